// Diagnostic trouble code domain model

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Danger,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticCode {
    pub code: String,
    pub description: String,
    pub severity: Severity,
}

impl DiagnosticCode {
    pub fn new(code: &str, description: &str, severity: Severity) -> Self {
        Self {
            code: code.to_string(),
            description: description.to_string(),
            severity,
        }
    }
}

/// Illustrative DTC list used while no live DTC feed exists.
pub fn sample_codes() -> Vec<DiagnosticCode> {
    vec![
        DiagnosticCode::new(
            "P0131",
            "Oxygen Sensor Circuit Low Voltage Detected",
            Severity::Normal,
        ),
        DiagnosticCode::new(
            "P07A3",
            "Transmission issue – friction element stuck, potential shifting problems.",
            Severity::Danger,
        ),
        DiagnosticCode::new(
            "P0171",
            "Catalytic converter not working efficiently, higher emissions possible",
            Severity::Normal,
        ),
        DiagnosticCode::new(
            "P0420",
            "Clutch disengagement problem – possible difficulty driving or moving vehicle",
            Severity::Danger,
        ),
    ]
}
