//! Endpoints the UI links to that have no behavior yet.

use crate::errors::ServiceError;

/// `GET /part/update-status`
pub async fn update_status() -> ServiceError {
    ServiceError::NotImplemented("Status update is not available".to_string())
}

/// `GET /part/generate-qr`
pub async fn generate_qr() -> ServiceError {
    ServiceError::NotImplemented("QR code generation is not available".to_string())
}

/// `GET /part/export-to-excel`
pub async fn export_to_excel() -> ServiceError {
    ServiceError::NotImplemented("Excel export is not available".to_string())
}
