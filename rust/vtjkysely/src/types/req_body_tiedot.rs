/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use xml_record::XmlRecord;

use crate::VTJKYSELY_NS_URI;

/// The parameters of a person identity query, as echoed back by the service
/// alongside its response.
///
/// Every parameter is optional on the wire; an empty element is kept as
/// `Some("")` rather than read as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, XmlRecord)]
#[xml_record(namespace = VTJKYSELY_NS_URI, rename_all = "PascalCase")]
pub struct HenkiloTunnusKyselyReqBodyTiedot {
    /// The name of the registry product (`SoSo`) being queried.
    pub so_so_nimi: Option<String>,

    pub kayttajatunnus: Option<String>,
    pub salasana: Option<String>,

    /// The end user on whose behalf the query is made.
    pub loppukayttaja: Option<String>,

    pub laskutustiedot: Option<String>,

    /// The personal identity code to look up.
    pub henkilotunnus: Option<String>,

    /// The electronic identification number (SATU) to look up, as an
    /// alternative to a personal identity code.
    pub sahkoinen_asiointitunnus: Option<String>,

    pub varmenteen_myontaja: Option<String>,

    /// A base64-encoded certificate identifying the person.
    pub x509_certificate: Option<String>,

    pub varmenteen_voimassaolotarkistus: Option<String>,
    pub varmenteen_sulkulistatarkistus: Option<String>,
    pub tunnistusportaali: Option<String>,
    pub vahvatunnistus: Option<String>,
}

#[cfg(test)]
mod tests {
    use xml_record::{DecodeMode, XmlRecord};

    use super::HenkiloTunnusKyselyReqBodyTiedot;
    use crate::test_utils::{
        assert_deserialized_content, assert_serialized_content, compact_codec,
    };

    #[test]
    fn element_names_are_pascal_case() {
        let names: Vec<_> = HenkiloTunnusKyselyReqBodyTiedot::FIELDS
            .iter()
            .map(|field| field.name.local_name)
            .collect();

        assert_eq!(
            names,
            vec![
                "SoSoNimi",
                "Kayttajatunnus",
                "Salasana",
                "Loppukayttaja",
                "Laskutustiedot",
                "Henkilotunnus",
                "SahkoinenAsiointitunnus",
                "VarmenteenMyontaja",
                "X509Certificate",
                "VarmenteenVoimassaolotarkistus",
                "VarmenteenSulkulistatarkistus",
                "Tunnistusportaali",
                "Vahvatunnistus",
            ]
        );
    }

    #[test]
    fn serialize_query_parameters() {
        let tiedot = HenkiloTunnusKyselyReqBodyTiedot {
            so_so_nimi: Some("TESTI".into()),
            kayttajatunnus: Some("user".into()),
            henkilotunnus: Some("010101-123N".into()),
            ..Default::default()
        };

        let expected = r#"<HenkiloTunnusKyselyReqBodyTiedot xmlns="http://xml.vrk.fi/ws/vtj/vtjkysely/1"><SoSoNimi>TESTI</SoSoNimi><Kayttajatunnus>user</Kayttajatunnus><Henkilotunnus>010101-123N</Henkilotunnus></HenkiloTunnusKyselyReqBodyTiedot>"#;

        assert_serialized_content(&tiedot, expected);
    }

    #[test]
    fn deserialize_query_parameters() {
        let content = r#"<HenkiloTunnusKyselyReqBodyTiedot xmlns="http://xml.vrk.fi/ws/vtj/vtjkysely/1">
            <SoSoNimi>TESTI</SoSoNimi>
            <Salasana/>
            <SahkoinenAsiointitunnus>999198037</SahkoinenAsiointitunnus>
        </HenkiloTunnusKyselyReqBodyTiedot>"#;

        let expected = HenkiloTunnusKyselyReqBodyTiedot {
            so_so_nimi: Some("TESTI".into()),
            salasana: Some(String::new()),
            sahkoinen_asiointitunnus: Some("999198037".into()),
            ..Default::default()
        };

        assert_deserialized_content(content, expected);
    }

    #[test]
    fn parameters_in_any_order_are_read_leniently() {
        let content = r#"<HenkiloTunnusKyselyReqBodyTiedot xmlns="http://xml.vrk.fi/ws/vtj/vtjkysely/1"><Henkilotunnus>010101-123N</Henkilotunnus><SoSoNimi>TESTI</SoSoNimi></HenkiloTunnusKyselyReqBodyTiedot>"#;

        let decoded = compact_codec::<HenkiloTunnusKyselyReqBodyTiedot>(DecodeMode::Lenient)
            .decode_document(content.as_bytes())
            .expect("lenient decode should accept out of order parameters");

        assert_eq!(decoded.henkilotunnus.as_deref(), Some("010101-123N"));
        assert_eq!(decoded.so_so_nimi.as_deref(), Some("TESTI"));

        compact_codec::<HenkiloTunnusKyselyReqBodyTiedot>(DecodeMode::Strict)
            .decode_document(content.as_bytes())
            .expect_err("strict decode should reject out of order parameters");
    }
}
