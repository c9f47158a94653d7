use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{FieldError, ValidationError};
use crate::models::{
    ConfigRequest, ConfigurationPath, FieldId, FieldRecord, FtthProvider, WanlinkKind,
};
use crate::resolver::required_fields;

pub(crate) const SBC_REGEX_PREFIX: &str = "<next type=\"regex\">";
pub(crate) const SBC_REGEX_SUFFIX: &str = "</next>";

static IPV4_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{1,3}\.){3}[0-9]{1,3}$").expect("valid IPv4 pattern"));
static WL_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^WL-[0-9]{6}$").expect("valid WL-ID pattern"));
static SVLAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,4}$").expect("valid SVLAN pattern"));

pub(crate) fn is_valid_ipv4(value: &str) -> bool {
    IPV4_RE.is_match(value)
        && value
            .split('.')
            .all(|part| part.parse::<u16>().is_ok_and(|num| num <= 255))
}

pub(crate) fn is_valid_wl_id(value: &str) -> bool {
    WL_ID_RE.is_match(value)
}

pub(crate) fn is_valid_svlan(value: &str) -> bool {
    SVLAN_RE.is_match(value)
}

/// Checks one WANLink field. Formats are matched on the trimmed value, but the raw
/// value is what gets interpolated, so character rules apply to it as typed.
pub(crate) fn check_field(id: FieldId, raw: &str) -> Result<String, FieldError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(FieldError::Missing);
    }
    match id {
        FieldId::IpAddress if !is_valid_ipv4(value) => return Err(FieldError::InvalidIpv4),
        FieldId::WlId if !is_valid_wl_id(value) => return Err(FieldError::InvalidWlId),
        FieldId::Svlan if !is_valid_svlan(value) => return Err(FieldError::InvalidSvlan),
        // Interpolated inside comment="...".
        FieldId::SiteName => reject_chars(raw, |ch| ch == '"' || ch.is_control())?,
        // Interpolated as bare key=value tokens.
        FieldId::Password | FieldId::PppoeUsername | FieldId::VlanId | FieldId::Trigramme => {
            reject_chars(raw, |ch| ch == '"' || ch.is_control() || ch.is_whitespace())?
        }
        _ => {}
    }
    Ok(raw.to_string())
}

fn reject_chars(value: &str, forbidden: impl Fn(char) -> bool) -> Result<(), FieldError> {
    match value.chars().find(|ch| forbidden(*ch)) {
        Some(ch) => Err(FieldError::ForbiddenChar(ch)),
        None => Ok(()),
    }
}

/// Message to show under a field. Untouched fields never show one.
pub(crate) fn field_error(path: &ConfigurationPath, id: FieldId, raw: &str) -> Option<FieldError> {
    if raw.is_empty() {
        return None;
    }
    let result = match path {
        ConfigurationPath::Sbc => check_sbc_field(id, raw).map(|_| ()),
        _ => check_field(id, raw).map(|_| ()),
    };
    result.err()
}

fn check_sbc_field(id: FieldId, raw: &str) -> Result<(), FieldError> {
    match id {
        FieldId::Numbers if raw.trim().is_empty() => Err(FieldError::Missing),
        FieldId::Regex if raw.is_empty() => Err(FieldError::Missing),
        FieldId::Regex
            if !(raw.starts_with(SBC_REGEX_PREFIX) && raw.ends_with(SBC_REGEX_SUFFIX)) =>
        {
            Err(FieldError::InvalidRegex)
        }
        FieldId::IsCentileLrt if raw != "true" && raw != "false" => {
            Err(FieldError::MissingLrtType)
        }
        _ => Ok(()),
    }
}

pub(crate) fn is_valid(path: &ConfigurationPath, fields: &FieldRecord) -> bool {
    ConfigRequest::from_record(path, fields).is_ok()
}

impl ConfigRequest {
    /// Validates `fields` against `path` and lifts them into the typed request.
    pub(crate) fn from_record(
        path: &ConfigurationPath,
        fields: &FieldRecord,
    ) -> Result<Self, ValidationError> {
        let ConfigurationPath::Wanlink(kind) = path else {
            return Self::sbc_from_record(fields);
        };

        let mut values: HashMap<FieldId, String> = HashMap::new();
        for id in required_fields(path, fields) {
            let value = check_field(id, fields.get(id))
                .map_err(|error| ValidationError { field: id, error })?;
            values.insert(id, value);
        }
        let mut take = |id: FieldId| values.remove(&id).unwrap_or_default();

        let request = match kind {
            WanlinkKind::Ftto => Self::Ftto {
                wl_id: take(FieldId::WlId),
                site_name: take(FieldId::SiteName),
                ip: take(FieldId::IpAddress),
                vlan_id: take(FieldId::VlanId),
            },
            WanlinkKind::Ftth(FtthProvider::Orange) => Self::Orange {
                ip: take(FieldId::IpAddress),
                pppoe_username: take(FieldId::PppoeUsername),
                password: take(FieldId::Password),
                site_name: take(FieldId::SiteName),
            },
            WanlinkKind::Ftth(FtthProvider::Axione(sub_type)) => Self::Axione {
                sub_type: *sub_type,
                ip: take(FieldId::IpAddress),
                wl_id: take(FieldId::WlId),
                password: take(FieldId::Password),
                site_name: take(FieldId::SiteName),
            },
            WanlinkKind::Ftth(FtthProvider::Ift) => {
                let trigramme = fields
                    .is_true(FieldId::IsVrf)
                    .then(|| take(FieldId::Trigramme));
                Self::Ift {
                    wl_id: take(FieldId::WlId),
                    site_name: take(FieldId::SiteName),
                    ip: take(FieldId::IpAddress),
                    svlan: take(FieldId::Svlan),
                    trigramme,
                }
            }
        };
        Ok(request)
    }

    fn sbc_from_record(fields: &FieldRecord) -> Result<Self, ValidationError> {
        for id in [FieldId::Numbers, FieldId::Regex, FieldId::IsCentileLrt] {
            let raw = fields.get(id);
            let checked = match id {
                FieldId::IsCentileLrt if raw.is_empty() => Err(FieldError::MissingLrtType),
                _ if raw.is_empty() => Err(FieldError::Missing),
                _ => check_sbc_field(id, raw),
            };
            checked.map_err(|error| ValidationError { field: id, error })?;
        }

        let numbers = fields
            .get(FieldId::Numbers)
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Ok(Self::Sbc {
            numbers,
            regex: fields.get(FieldId::Regex).to_string(),
            centile_lrt: fields.is_true(FieldId::IsCentileLrt),
        })
    }
}
