use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum AxioneSubType {
    Pro,
    Opera,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum FtthProvider {
    Orange,
    Axione(AxioneSubType),
    Ift,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum WanlinkKind {
    Ftth(FtthProvider),
    Ftto,
}

/// Which template family a form renders into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum ConfigurationPath {
    Wanlink(WanlinkKind),
    Sbc,
}

impl ConfigurationPath {
    pub(crate) const ALL: [ConfigurationPath; 6] = [
        ConfigurationPath::Wanlink(WanlinkKind::Ftth(FtthProvider::Orange)),
        ConfigurationPath::Wanlink(WanlinkKind::Ftth(FtthProvider::Axione(AxioneSubType::Pro))),
        ConfigurationPath::Wanlink(WanlinkKind::Ftth(FtthProvider::Axione(AxioneSubType::Opera))),
        ConfigurationPath::Wanlink(WanlinkKind::Ftth(FtthProvider::Ift)),
        ConfigurationPath::Wanlink(WanlinkKind::Ftto),
        ConfigurationPath::Sbc,
    ];

    /// Position in the selection tree, root first.
    pub(crate) fn tree_segments(&self) -> Vec<&'static str> {
        match self {
            Self::Wanlink(WanlinkKind::Ftth(provider)) => {
                let mut parts = vec!["Configuration WANLink", "FTTH"];
                match provider {
                    FtthProvider::Orange => parts.push("Orange"),
                    FtthProvider::Axione(sub_type) => {
                        parts.push("Axione");
                        parts.push(sub_type.label());
                    }
                    FtthProvider::Ift => parts.push("IFT"),
                }
                parts
            }
            Self::Wanlink(WanlinkKind::Ftto) => vec!["Configuration WANLink", "FTTO"],
            Self::Sbc => vec!["Configuration SBC"],
        }
    }

    pub(crate) fn title(&self) -> String {
        self.tree_segments().join(" / ")
    }
}

impl AxioneSubType {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Pro => "FTTH Pro",
            Self::Opera => "FTTH Opera",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TreeItem {
    pub(crate) label: String,
    pub(crate) depth: usize,
    pub(crate) path: Option<ConfigurationPath>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FieldKind {
    Text,
    MultiLine,
    Toggle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) enum FieldId {
    IpAddress,
    PppoeUsername,
    WlId,
    Password,
    SiteName,
    VlanId,
    Svlan,
    IsVrf,
    Trigramme,
    Numbers,
    Regex,
    IsCentileLrt,
}

impl FieldId {
    pub(crate) fn key(&self) -> &'static str {
        match self {
            Self::IpAddress => "ipAddress",
            Self::PppoeUsername => "pppoeUsername",
            Self::WlId => "wlId",
            Self::Password => "password",
            Self::SiteName => "siteName",
            Self::VlanId => "vlanId",
            Self::Svlan => "svlan",
            Self::IsVrf => "isVrf",
            Self::Trigramme => "trigramme",
            Self::Numbers => "numbers",
            Self::Regex => "regex",
            Self::IsCentileLrt => "isCentileLRT",
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::IpAddress => "Adresse IP Publique",
            Self::PppoeUsername => "Identifiant PPPoE (WL-XXXXX@ipvpn.tims.oc)",
            Self::WlId => "Identifiant WL (format WL-XXXXXX)",
            Self::Password => "Mot de passe PPPoE",
            Self::SiteName => "Nom du site client",
            Self::VlanId => "Numéro de VLAN (format XXXX)",
            Self::Svlan => "Numéro de SVLAN (format XXXX)",
            Self::IsVrf => "VRF Client",
            Self::Trigramme => "Trigramme Client",
            Self::Numbers => "Numéros (un par ligne)",
            Self::Regex => "Expression régulière",
            Self::IsCentileLrt => "Type LRT",
        }
    }

    pub(crate) fn kind(&self) -> FieldKind {
        match self {
            Self::Numbers => FieldKind::MultiLine,
            Self::IsVrf | Self::IsCentileLrt => FieldKind::Toggle,
            _ => FieldKind::Text,
        }
    }

    /// Captions for the `"true"` and `"false"` states of a toggle.
    pub(crate) fn toggle_captions(&self) -> (&'static str, &'static str) {
        match self {
            Self::IsCentileLrt => ("Centile LRT", "Standard LRT"),
            _ => ("Oui", "Non"),
        }
    }
}

/// Raw values as typed into the form. Absent and empty are the same thing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct FieldRecord {
    values: HashMap<FieldId, String>,
}

impl FieldRecord {
    pub(crate) fn get(&self, id: FieldId) -> &str {
        self.values.get(&id).map(String::as_str).unwrap_or("")
    }

    pub(crate) fn set(&mut self, id: FieldId, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.values.remove(&id);
        } else {
            self.values.insert(id, value);
        }
    }

    pub(crate) fn is_true(&self, id: FieldId) -> bool {
        self.get(id) == "true"
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A validated form, one variant per template family.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ConfigRequest {
    Ftto {
        wl_id: String,
        site_name: String,
        ip: String,
        vlan_id: String,
    },
    Orange {
        ip: String,
        pppoe_username: String,
        password: String,
        site_name: String,
    },
    Axione {
        sub_type: AxioneSubType,
        ip: String,
        wl_id: String,
        password: String,
        site_name: String,
    },
    Ift {
        wl_id: String,
        site_name: String,
        ip: String,
        svlan: String,
        trigramme: Option<String>,
    },
    Sbc {
        numbers: Vec<String>,
        regex: String,
        centile_lrt: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_overwrites_and_clears() {
        let mut record = FieldRecord::default();
        record.set(FieldId::SiteName, "Site A");
        record.set(FieldId::SiteName, "Site B");
        assert_eq!(record.get(FieldId::SiteName), "Site B");

        record.set(FieldId::SiteName, "");
        assert_eq!(record.get(FieldId::SiteName), "");
        assert!(record.is_empty());
    }

    #[test]
    fn tree_segments_nest_axione_sub_types() {
        let path = ConfigurationPath::Wanlink(WanlinkKind::Ftth(FtthProvider::Axione(
            AxioneSubType::Opera,
        )));
        assert_eq!(
            path.tree_segments(),
            vec!["Configuration WANLink", "FTTH", "Axione", "FTTH Opera"]
        );
        assert_eq!(ConfigurationPath::Sbc.title(), "Configuration SBC");
    }

    #[test]
    fn field_keys_are_distinct() {
        let ids = [
            FieldId::IpAddress,
            FieldId::PppoeUsername,
            FieldId::WlId,
            FieldId::Password,
            FieldId::SiteName,
            FieldId::VlanId,
            FieldId::Svlan,
            FieldId::IsVrf,
            FieldId::Trigramme,
            FieldId::Numbers,
            FieldId::Regex,
            FieldId::IsCentileLrt,
        ];
        let mut keys: Vec<&str> = ids.iter().map(FieldId::key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), ids.len());
    }
}
