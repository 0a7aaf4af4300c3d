// src/core/mod.rs

/// Form, field and result types shared by the whole client.
pub mod models;

/// Field validation and the completion meter.
pub mod validation;

/// The form store (get/set/clear by key) and the helpers that persist the
/// in-progress form across restarts.
pub mod storage;

/// Loading cough recordings from disk.
pub mod audio;

/// The multipart client for the prediction endpoint.
pub mod predictor;

/// Probability clamping and the severity classifier used by the results page.
pub mod severity;
