#[derive(Debug)]
pub enum ApplicationError {
    NotFound,
    InternalError(String),
    DatabaseError(String),
    BadRequest(String),
    Unauthorized,
    Forbidden,
    PayloadTooLarge,
    OtpDelivery(String),
    InvalidOtp,
}
