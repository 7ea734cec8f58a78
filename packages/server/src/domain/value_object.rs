//! 値オブジェクト

use std::{fmt, str::FromStr};

use uuid::Uuid;

use tallyroom_shared::name::normalize_name;

use super::error::{InvalidChoice, NameError};

/// `hello` を受け取るまでの参加者名
pub const UNKNOWN_PARTICIPANT: &str = "unknown";

/// 参加者名の最大文字数
pub use tallyroom_shared::name::MAX_NAME_LENGTH;

/// 接続ごとに振られる識別子
///
/// トランスポート層の接続を表す不透明なハンドルで、レジストリのキーになります。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 参加者の表示名
///
/// 前後の空白は取り除かれ、空文字列と `MAX_NAME_LENGTH` を超える名前は拒否されます。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParticipantName(String);

impl ParticipantName {
    pub fn new(value: String) -> Result<Self, NameError> {
        normalize_name(&value).map(Self)
    }

    /// 名前が未設定の参加者を表すセンチネル
    pub fn unknown() -> Self {
        Self(UNKNOWN_PARTICIPANT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ParticipantName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ParticipantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 選択肢
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    A,
    B,
}

impl Choice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Choice::A => "A",
            Choice::B => "B",
        }
    }
}

impl FromStr for Choice {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Choice::A),
            "B" => Ok(Choice::B),
            other => Err(InvalidChoice(other.to_string())),
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unix タイムスタンプ（ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
