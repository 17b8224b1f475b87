use crate::models::certificate::ExtractedField;
use crate::models::enums::CertificateType;

/// A document-type cue: keyword, resulting type, and how distinctive the
/// keyword is. Checked in order against filename + document text; the first
/// hit wins, so distinctive phrases sit above loose ones.
struct TypeCue {
    keyword: &'static str,
    certificate_type: CertificateType,
    confidence: f32,
}

const TYPE_CUES: &[TypeCue] = &[
    TypeCue { keyword: "workcover medical certificate", certificate_type: CertificateType::WorkcoverCertificate, confidence: 0.95 },
    TypeCue { keyword: "certificate of capacity", certificate_type: CertificateType::WorkcoverCertificate, confidence: 0.9 },
    TypeCue { keyword: "workcover", certificate_type: CertificateType::WorkcoverCertificate, confidence: 0.85 },
    TypeCue { keyword: "specialist report", certificate_type: CertificateType::SpecialistReport, confidence: 0.85 },
    TypeCue { keyword: "specialist", certificate_type: CertificateType::SpecialistReport, confidence: 0.7 },
    TypeCue { keyword: "orthopaedic", certificate_type: CertificateType::SpecialistReport, confidence: 0.7 },
    TypeCue { keyword: "consultant", certificate_type: CertificateType::SpecialistReport, confidence: 0.6 },
    TypeCue { keyword: "gp report", certificate_type: CertificateType::GpReport, confidence: 0.85 },
    TypeCue { keyword: "general practitioner", certificate_type: CertificateType::GpReport, confidence: 0.75 },
    TypeCue { keyword: "medical certificate", certificate_type: CertificateType::GpReport, confidence: 0.6 },
];

/// Generic fallback when no keyword matched anywhere.
const FALLBACK_CONFIDENCE: f32 = 0.3;

/// Classify the certificate type from filename and document keywords.
/// Confidence reflects how distinctive the matched keyword is; an
/// unclassifiable document is `Other` with a low confidence, never missing —
/// every ingested document has some type.
pub fn classify_certificate_type(text: &str, filename: &str) -> ExtractedField<CertificateType> {
    let haystack = format!("{}\n{}", filename.to_lowercase(), text.to_lowercase());

    for cue in TYPE_CUES {
        if haystack.contains(cue.keyword) {
            return ExtractedField::found(
                cue.certificate_type,
                cue.confidence,
                Some(cue.keyword.to_string()),
            );
        }
    }

    ExtractedField::found(CertificateType::Other, FALLBACK_CONFIDENCE, None)
}
