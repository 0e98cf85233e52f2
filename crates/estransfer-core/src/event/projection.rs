//! Projection status and commands.

use serde::Deserialize;

/// Commands accepted by a projection's command endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionCommand {
    Enable,
    Disable,
}

impl ProjectionCommand {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectionCommand::Enable => "enable",
            ProjectionCommand::Disable => "disable",
        }
    }
}

/// The subset of a projection's status document the transfer tool reads.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProjectionStatus {
    /// Percent complete, 0 to 100.
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub status: Option<String>,
}

impl ProjectionStatus {
    pub fn is_complete(&self) -> bool {
        self.progress >= 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_progress_is_zero() {
        let status: ProjectionStatus =
            serde_json::from_value(json!({"status": "Running"})).unwrap();
        assert_eq!(status.progress, 0.0);
        assert!(!status.is_complete());
    }

    #[test]
    fn complete_at_one_hundred() {
        let status: ProjectionStatus =
            serde_json::from_value(json!({"progress": 100.0, "status": "Stopped"})).unwrap();
        assert!(status.is_complete());
    }
}
