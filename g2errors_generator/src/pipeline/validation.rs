use crate::category::{classify, CategoryTag};
use crate::emitter::Backend;
use crate::logging::codes;
use std::collections::HashSet;

/// Validate that the generator is consistently configured
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating generator configuration");

    let used = [
        codes::mapping::UNMAPPED_CLASS,
        codes::emit::OUTPUT_DIRECTORY_MISSING,
        codes::emit::WRITE_FAILED,
        codes::emit::PERSIST_FAILED,
        codes::emit::ARTIFACT_STALE,
        codes::emit::READ_EXISTING_FAILED,
        codes::success::TABLE_LOADED,
        codes::success::ARTIFACT_RENDERED,
        codes::success::ARTIFACT_WRITTEN,
        codes::success::ARTIFACT_UP_TO_DATE,
        codes::success::GENERATION_COMPLETE,
    ];
    for code in used {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!("Missing metadata for code: {}", code));
        }
    }

    let footer: HashSet<CategoryTag> = CategoryTag::FOOTER_ORDER.into_iter().collect();
    if footer.len() != CategoryTag::ALL.len() || CategoryTag::ALL.iter().any(|t| !footer.contains(t)) {
        return Err("Footer enumeration does not cover every category tag".to_string());
    }

    for tag in CategoryTag::ALL {
        let class = tag.python_class();
        let tags = classify(&class).map_err(|e| e.to_string())?;
        if tags.innermost() != tag || !tags.category().is_category() {
            return Err(format!("Class {} does not map back to {}", class, tag));
        }
    }

    let outputs: HashSet<&str> = Backend::ALL.iter().map(|b| b.output_file()).collect();
    if outputs.len() != Backend::ALL.len() {
        return Err("Backends share an output path".to_string());
    }

    crate::log_success!(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Generator validation succeeded",
        "backends" => Backend::ALL.len(),
        "category_tags" => CategoryTag::ALL.len()
    );

    Ok(())
}
