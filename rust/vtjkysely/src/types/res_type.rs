/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use xml_record::{Element, XmlRecord};

use crate::{VTJKYSELY_NS_URI, VTJ_SCHEMA_NS_URI};

/// The registry's answer to a person identity query.
///
/// The answer message belongs to a separate schema and is carried as an
/// uninterpreted element subtree.
#[derive(Clone, Debug, Default, PartialEq, Eq, XmlRecord)]
#[xml_record(namespace = VTJKYSELY_NS_URI)]
pub struct HenkiloTunnusKyselyResType {
    #[xml_record(rename = "VTJHenkiloVastaussanoma", namespace = VTJ_SCHEMA_NS_URI)]
    pub vtj_henkilo_vastaussanoma: Option<Element>,
}
