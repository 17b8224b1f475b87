pub mod case;
pub mod certificate;
pub mod enums;

pub use case::CaseSnapshot;
pub use certificate::{CertificateExtraction, ExtractedField};
