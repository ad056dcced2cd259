//! Session Hand-off
//!
//! `sessionStorage` carries the analysis from the landing page to the
//! dashboard. Three keys are written together after a successful analysis.

use super::analysis::AnalysisResult;

pub const DOCUMENT_NAME_KEY: &str = "documentName";
pub const ANALYSIS_RESULT_KEY: &str = "analysisResult";
pub const FULL_DOCUMENT_TEXT_KEY: &str = "fullDocumentText";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.session_storage().ok()?
}

/// Keys in write order. The dashboard only renders once `analysisResult`
/// exists, so it goes last.
fn entries<'a>(
    document_name: &'a str,
    serialized: &'a str,
    full_document_text: &'a str,
) -> [(&'static str, &'a str); 3] {
    [
        (DOCUMENT_NAME_KEY, document_name),
        (FULL_DOCUMENT_TEXT_KEY, full_document_text),
        (ANALYSIS_RESULT_KEY, serialized),
    ]
}

/// Store a finished analysis. A failed write (quota) removes every key, so
/// no half-written analysis is left behind.
pub fn save_analysis(document_name: &str, result: &AnalysisResult) -> Result<(), String> {
    let storage = storage().ok_or_else(|| "Session storage unavailable".to_string())?;
    let serialized =
        serde_json::to_string(result).map_err(|e| format!("Serialize error: {}", e))?;

    for (key, value) in entries(document_name, &serialized, &result.full_document_text) {
        if storage.set_item(key, value).is_err() {
            clear();
            return Err(format!("Failed to store {}", key));
        }
    }
    Ok(())
}

/// The stored analysis, if both its name and result are present
pub fn load_analysis() -> Option<(String, AnalysisResult)> {
    let storage = storage()?;
    let name = storage.get_item(DOCUMENT_NAME_KEY).ok()??;
    let raw = storage.get_item(ANALYSIS_RESULT_KEY).ok()??;

    match serde_json::from_str(&raw) {
        Ok(result) => Some((name, result)),
        Err(e) => {
            web_sys::console::error_1(&format!("Stored analysis is unreadable: {}", e).into());
            None
        }
    }
}

/// Document text sent as chat context
pub fn document_text() -> Option<String> {
    storage()?.get_item(FULL_DOCUMENT_TEXT_KEY).ok()?
}

/// Forget the stored analysis
pub fn clear() {
    if let Some(storage) = storage() {
        for key in [DOCUMENT_NAME_KEY, ANALYSIS_RESULT_KEY, FULL_DOCUMENT_TEXT_KEY] {
            let _ = storage.remove_item(key);
        }
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::state::analysis::RiskFlag;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn sample() -> AnalysisResult {
        AnalysisResult {
            summary: "Lease summary.".to_string(),
            risk_flags: vec![RiskFlag {
                title: "Late fee".to_string(),
                explanation: "5% after the 5th.".to_string(),
                level: "Yellow".to_string(),
            }],
            key_clauses: vec![],
            full_document_text: "Rent is due on the 1st.".to_string(),
        }
    }

    #[wasm_bindgen_test]
    fn test_round_trip_and_clear() {
        save_analysis("lease.pdf", &sample()).unwrap();

        let (name, result) = load_analysis().unwrap();
        assert_eq!(name, "lease.pdf");
        assert_eq!(result, sample());
        assert_eq!(document_text().as_deref(), Some("Rent is due on the 1st."));

        clear();
        assert!(load_analysis().is_none());
        assert!(document_text().is_none());
    }
}
