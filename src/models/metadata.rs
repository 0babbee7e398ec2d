use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Registry value describing a runnable job: the image to run plus
/// descriptive fields maintained by the job's authors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobMetadata {
    pub image_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub contributors: String,
    #[serde(default)]
    pub organization: String,
}

/// Sensitive key/value pairs injected into the execution environment.
/// Never logged and never echoed back to clients.
pub type JobSecrets = HashMap<String, String>;
