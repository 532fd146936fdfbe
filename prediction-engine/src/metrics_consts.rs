pub const HTTP_REQUESTS_COUNTER: &str = "http_requests_total";
pub const HTTP_REQUESTS_DURATION: &str = "http_requests_duration_seconds";

pub const RECORDS_UPLOADED_COUNTER: &str = "prediction_engine_records_uploaded_total";
pub const UPLOADS_REJECTED_COUNTER: &str = "prediction_engine_uploads_rejected_total";
pub const PREDICTIONS_SERVED_COUNTER: &str = "prediction_engine_predictions_total";
pub const CHAT_INTENT_COUNTER: &str = "prediction_engine_chat_intents_total";
