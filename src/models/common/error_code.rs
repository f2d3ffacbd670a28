use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 对外暴露的业务错误码，按 HTTP 状态分段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub enum ErrorCode {
    Success = 0,

    // 400
    BadRequest = 40000,
    ValidationFailed = 40001,
    AlreadyMember = 40002,
    PinResetRequired = 40003,

    // 401
    Unauthorized = 40100,
    AuthFailed = 40101,
    InvalidPin = 40102,

    // 403
    PermissionDenied = 40300,
    NotOwner = 40301,
    OwnerCannotLeave = 40302,
    NotAMember = 40303,

    // 404
    NotFound = 40400,
    ClassNotFound = 40401,
    InvalidPassphrase = 40402,
    UserNotFound = 40403,
    IdentityNotFound = 40404,

    // 409
    UserAlreadyExists = 40900,

    // 500
    InternalServerError = 50000,
    ClassCreationFailed = 50001,
    ClassJoinFailed = 50002,
    ClassDeleteFailed = 50003,
    RegisterFailed = 50004,
}
