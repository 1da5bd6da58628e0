/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use xml_record::XmlRecord;

use crate::{HenkiloTunnusKyselyReqBodyTiedot, VTJKYSELY_NS_URI};

/// The body of a person identity query request.
#[derive(Clone, Debug, Default, PartialEq, Eq, XmlRecord)]
#[xml_record(namespace = VTJKYSELY_NS_URI)]
pub struct HenkiloTunnusKyselyReqBody {
    pub request: Option<HenkiloTunnusKyselyReqBodyTiedot>,
}

#[cfg(test)]
mod tests {
    use super::HenkiloTunnusKyselyReqBody;
    use crate::{
        test_utils::{assert_deserialized_content, assert_serialized_content},
        HenkiloTunnusKyselyReqBodyTiedot,
    };

    #[test]
    fn serialize_request_body() {
        let body = HenkiloTunnusKyselyReqBody {
            request: Some(HenkiloTunnusKyselyReqBodyTiedot {
                henkilotunnus: Some("010101-123N".into()),
                ..Default::default()
            }),
        };

        let expected = r#"<HenkiloTunnusKyselyReqBody xmlns="http://xml.vrk.fi/ws/vtj/vtjkysely/1"><request><Henkilotunnus>010101-123N</Henkilotunnus></request></HenkiloTunnusKyselyReqBody>"#;

        assert_serialized_content(&body, expected);
        assert_deserialized_content(expected, body);
    }
}
