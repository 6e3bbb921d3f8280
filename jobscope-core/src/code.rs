/// Business status codes carried in the `code` field of a response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Code {
    Ok,
}

impl Code {
    pub const fn as_i32(self) -> i32 {
        match self {
            Code::Ok => 200,
        }
    }

    /// Only `200` marks a successful envelope.
    pub const fn is_ok(code: i32) -> bool {
        code == Code::Ok.as_i32()
    }
}
