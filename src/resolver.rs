use crate::models::{ConfigurationPath, FieldId, FieldRecord, FtthProvider, WanlinkKind};

const SBC_FIELDS: [FieldId; 3] = [FieldId::Numbers, FieldId::Regex, FieldId::IsCentileLrt];

/// Fields a WANLink form must fill, in display order.
///
/// IFT is the only family whose set depends on what was already typed: `trigramme`
/// joins the list once `isVrf` is `"true"`. SBC has its own fixed predicate and
/// resolves to nothing here.
pub(crate) fn required_fields(path: &ConfigurationPath, fields: &FieldRecord) -> Vec<FieldId> {
    match path {
        ConfigurationPath::Wanlink(WanlinkKind::Ftto) => vec![
            FieldId::WlId,
            FieldId::SiteName,
            FieldId::IpAddress,
            FieldId::VlanId,
        ],
        ConfigurationPath::Wanlink(WanlinkKind::Ftth(FtthProvider::Orange)) => vec![
            FieldId::IpAddress,
            FieldId::PppoeUsername,
            FieldId::Password,
            FieldId::SiteName,
        ],
        ConfigurationPath::Wanlink(WanlinkKind::Ftth(FtthProvider::Axione(_))) => vec![
            FieldId::IpAddress,
            FieldId::WlId,
            FieldId::Password,
            FieldId::SiteName,
        ],
        ConfigurationPath::Wanlink(WanlinkKind::Ftth(FtthProvider::Ift)) => {
            let mut ids = vec![
                FieldId::WlId,
                FieldId::SiteName,
                FieldId::IpAddress,
                FieldId::Svlan,
                FieldId::IsVrf,
            ];
            if fields.is_true(FieldId::IsVrf) {
                ids.push(FieldId::Trigramme);
            }
            ids
        }
        ConfigurationPath::Sbc => Vec::new(),
    }
}

/// Fields the form shows for `path`, SBC included.
pub(crate) fn form_fields(path: &ConfigurationPath, fields: &FieldRecord) -> Vec<FieldId> {
    match path {
        ConfigurationPath::Sbc => SBC_FIELDS.to_vec(),
        _ => required_fields(path, fields),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AxioneSubType;

    const IFT: ConfigurationPath = ConfigurationPath::Wanlink(WanlinkKind::Ftth(FtthProvider::Ift));

    #[test]
    fn static_families_resolve_in_form_order() {
        let empty = FieldRecord::default();
        assert_eq!(
            required_fields(&ConfigurationPath::Wanlink(WanlinkKind::Ftto), &empty),
            vec![
                FieldId::WlId,
                FieldId::SiteName,
                FieldId::IpAddress,
                FieldId::VlanId
            ]
        );
        assert_eq!(
            required_fields(
                &ConfigurationPath::Wanlink(WanlinkKind::Ftth(FtthProvider::Orange)),
                &empty
            ),
            vec![
                FieldId::IpAddress,
                FieldId::PppoeUsername,
                FieldId::Password,
                FieldId::SiteName
            ]
        );
        for sub_type in [AxioneSubType::Pro, AxioneSubType::Opera] {
            let path =
                ConfigurationPath::Wanlink(WanlinkKind::Ftth(FtthProvider::Axione(sub_type)));
            assert_eq!(
                required_fields(&path, &empty),
                vec![
                    FieldId::IpAddress,
                    FieldId::WlId,
                    FieldId::Password,
                    FieldId::SiteName
                ]
            );
        }
    }

    #[test]
    fn ift_requires_trigramme_only_with_vrf() {
        let mut record = FieldRecord::default();
        assert!(!required_fields(&IFT, &record).contains(&FieldId::Trigramme));

        record.set(FieldId::IsVrf, "true");
        let ids = required_fields(&IFT, &record);
        assert_eq!(ids.last(), Some(&FieldId::Trigramme));
        assert_eq!(ids.len(), 6);

        record.set(FieldId::IsVrf, "false");
        assert!(!required_fields(&IFT, &record).contains(&FieldId::Trigramme));
    }

    #[test]
    fn sbc_is_not_resolved_but_still_has_a_form() {
        let empty = FieldRecord::default();
        assert!(required_fields(&ConfigurationPath::Sbc, &empty).is_empty());
        assert_eq!(form_fields(&ConfigurationPath::Sbc, &empty), SBC_FIELDS.to_vec());
    }
}
