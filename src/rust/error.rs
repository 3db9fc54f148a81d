use std::path::PathBuf;

use crate::classifier::ClassifierError;

/// The startup resources the application cannot run without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    ModelArtifact,
    SchemaDocument,
}

impl Resource {
    /// What to tell the user so they can produce the missing file.
    pub fn hint(&self) -> &'static str {
        match self {
            Resource::ModelArtifact => "Hãy đảm bảo bạn đã huấn luyện và xuất mô hình sang định dạng ONNX trước khi chạy ứng dụng.",
            Resource::SchemaDocument => "Hãy đảm bảo bạn đã tạo tệp này thủ công hoặc chạy bước huấn luyện để sinh ra nó.",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::ModelArtifact => write!(f, "model artifact"),
            Resource::SchemaDocument => write!(f, "schema document"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StressError {
    #[error("Không tìm thấy tệp {resource} '{}'", path.display())]
    ConfigNotFound {
        resource: Resource,
        path: PathBuf,
    },
    #[error("Tệp {resource} '{}' không hợp lệ: {reason}", path.display())]
    ConfigInvalid {
        resource: Resource,
        path: PathBuf,
        reason: String,
    },
    #[error("Đã xảy ra lỗi trong quá trình dự đoán: {0}")]
    PredictionFailure(#[from] ClassifierError),
    #[error("Không có chỉ số nào tên là '{0}'")]
    UnknownFeature(String),
}

impl StressError {
    pub(crate) fn invalid(resource: Resource, path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        StressError::ConfigInvalid {
            resource,
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Configuration errors halt the application before any form is shown.
    pub fn is_fatal(&self) -> bool {
        matches!(self, StressError::ConfigNotFound { .. } | StressError::ConfigInvalid { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_names_the_resource() {
        let err = StressError::ConfigNotFound {
            resource: Resource::ModelArtifact,
            path: PathBuf::from("stress_trained.onnx"),
        };
        let message = err.to_string();
        assert!(message.contains("model artifact"));
        assert!(message.contains("stress_trained.onnx"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_prediction_failure_carries_cause() {
        let err = StressError::from(ClassifierError::PredictionError("shape mismatch".into()));
        assert!(err.to_string().contains("shape mismatch"));
        assert!(!err.is_fatal());
    }
}
