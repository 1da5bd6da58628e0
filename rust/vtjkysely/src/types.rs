/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

mod req_body;
mod req_body_tiedot;
mod res_body;
mod res_type;

pub use req_body::*;
pub use req_body_tiedot::*;
pub use res_body::*;
pub use res_type::*;
