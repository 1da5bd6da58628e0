/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use xml_record::XmlRecord;

use crate::{HenkiloTunnusKyselyReqBodyTiedot, HenkiloTunnusKyselyResType, VTJKYSELY_NS_URI};

/// The body of a response to a person identity query.
///
/// Both parts are optional and, when present, appear on the wire as
/// `request` followed by `response`, whatever order they were set in.
#[derive(Clone, Debug, Default, PartialEq, Eq, XmlRecord)]
#[xml_record(namespace = VTJKYSELY_NS_URI)]
pub struct HenkiloTunnusKyselyResBody {
    /// The query parameters the response answers.
    request: Option<HenkiloTunnusKyselyReqBodyTiedot>,

    /// The registry's answer.
    response: Option<HenkiloTunnusKyselyResType>,
}

impl HenkiloTunnusKyselyResBody {
    pub fn new(
        request: Option<HenkiloTunnusKyselyReqBodyTiedot>,
        response: Option<HenkiloTunnusKyselyResType>,
    ) -> Self {
        Self { request, response }
    }

    pub fn request(&self) -> Option<&HenkiloTunnusKyselyReqBodyTiedot> {
        self.request.as_ref()
    }

    pub fn set_request(&mut self, request: HenkiloTunnusKyselyReqBodyTiedot) {
        self.request = Some(request);
    }

    pub fn take_request(&mut self) -> Option<HenkiloTunnusKyselyReqBodyTiedot> {
        self.request.take()
    }

    pub fn clear_request(&mut self) {
        self.request = None;
    }

    pub fn response(&self) -> Option<&HenkiloTunnusKyselyResType> {
        self.response.as_ref()
    }

    pub fn set_response(&mut self, response: HenkiloTunnusKyselyResType) {
        self.response = Some(response);
    }

    pub fn take_response(&mut self) -> Option<HenkiloTunnusKyselyResType> {
        self.response.take()
    }

    pub fn clear_response(&mut self) {
        self.response = None;
    }
}
