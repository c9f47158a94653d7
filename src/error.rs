use thiserror::Error;

use crate::models::FieldId;

/// Why a single form field is rejected. Display strings are shown under the field.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub(crate) enum FieldError {
    #[error("Champ obligatoire")]
    Missing,
    #[error("Veuillez entrer une adresse IPv4 valide")]
    InvalidIpv4,
    #[error("Format invalide. Utilisez le format WL-XXXXXX")]
    InvalidWlId,
    #[error("Le SVLAN doit contenir entre 1 et 4 chiffres")]
    InvalidSvlan,
    #[error("Caractère interdit: {0:?}")]
    ForbiddenChar(char),
    #[error("L'expression doit commencer par <next type=\"regex\"> et finir par </next>")]
    InvalidRegex,
    #[error("Choisissez un type LRT")]
    MissingLrtType,
}

/// The first failing field of a form.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{}: {error}", .field.label())]
pub(crate) struct ValidationError {
    pub(crate) field: FieldId,
    pub(crate) error: FieldError,
}

#[derive(Debug, Error)]
pub(crate) enum SystemError {
    #[error("Copie impossible: {0}")]
    Clipboard(#[from] arboard::Error),
    #[error("Erreur d'E/S: {path} ({source})")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Impossible de localiser le répertoire utilisateur")]
    NoHome,
    #[error("Initialisation des journaux impossible: {0}")]
    Logging(String),
}
