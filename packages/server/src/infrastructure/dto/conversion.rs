//! Conversion logic between wire messages and domain models.

use serde_json::Value;
use thiserror::Error;

use crate::domain::{
    Action, Choice, ParticipantName, SharedState, SnapshotEncodeError, SnapshotEncoder,
};
use tallyroom_shared::protocol::{
    ACTION_DONE, ACTION_HELLO, ACTION_LOCK, ACTION_RESET, ACTION_SELECT, ActionEnvelope,
    SharedStateDto,
};

/// Errors raised while decoding an upstream frame
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Not a JSON object with a string `action`
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Known action with a payload of the wrong shape
    #[error("invalid payload for '{action}': {reason}")]
    InvalidPayload { action: String, reason: String },
}

/// Decode one upstream text frame into an `Action`.
pub fn decode_action(raw: &str) -> Result<Action, DecodeError> {
    let envelope: ActionEnvelope = serde_json::from_str(raw)?;
    Action::try_from(envelope)
}

/// Serialize the shared state into the downstream wire format.
pub fn encode_snapshot(state: &SharedState) -> Result<String, serde_json::Error> {
    serde_json::to_string(&SharedStateDto::from(state))
}

/// `SnapshotEncoder` producing the JSON downstream format
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSnapshotEncoder;

impl SnapshotEncoder for JsonSnapshotEncoder {
    fn encode(&self, state: &SharedState) -> Result<String, SnapshotEncodeError> {
        encode_snapshot(state).map_err(|e| SnapshotEncodeError(e.to_string()))
    }
}

// ========================================
// Wire → Domain
// ========================================

impl TryFrom<ActionEnvelope> for Action {
    type Error = DecodeError;

    fn try_from(envelope: ActionEnvelope) -> Result<Self, Self::Error> {
        let ActionEnvelope { action, payload } = envelope;

        match action.as_str() {
            ACTION_HELLO => {
                let name = payload
                    .get("name")
                    .and_then(Value::as_str)
                    .ok_or_else(|| invalid(&action, "expected {\"name\": string}"))?;
                ParticipantName::new(name.to_string())
                    .map(Action::Hello)
                    .map_err(|e| invalid(&action, e))
            }
            ACTION_SELECT => {
                let option = payload
                    .as_str()
                    .ok_or_else(|| invalid(&action, "expected \"A\" or \"B\""))?;
                option
                    .parse::<Choice>()
                    .map(Action::Select)
                    .map_err(|e| invalid(&action, e))
            }
            ACTION_DONE => {
                let name = payload
                    .as_str()
                    .ok_or_else(|| invalid(&action, "expected the participant name"))?;
                ParticipantName::new(name.to_string())
                    .map(Action::Done)
                    .map_err(|e| invalid(&action, e))
            }
            ACTION_LOCK => Ok(Action::Lock),
            ACTION_RESET => Ok(Action::Reset),
            other => Ok(Action::Unrecognized(other.to_string())),
        }
    }
}

fn invalid(action: &str, reason: impl ToString) -> DecodeError {
    DecodeError::InvalidPayload {
        action: action.to_string(),
        reason: reason.to_string(),
    }
}

// ========================================
// Domain → Wire
// ========================================

impl From<&SharedState> for SharedStateDto {
    fn from(state: &SharedState) -> Self {
        Self {
            locked: state.locked,
            selected_option: state.selected_option.map(|c| c.as_str().to_string()),
            done_by: state
                .done_by
                .iter()
                .map(|name| name.as_str().to_string())
                .collect(),
            last_action: state.last_action.map(|a| a.label()),
            last_by: state.last_by.as_ref().map(|name| name.as_str().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LastAction;

    fn name(value: &str) -> ParticipantName {
        ParticipantName::new(value.to_string()).unwrap()
    }

    #[test]
    fn test_decode_hello() {
        // テスト項目: hello の payload.name が参加者名としてデコードされる
        // given (前提条件):
        let raw = r#"{"action":"hello","payload":{"name":"alice"}}"#;

        // when (操作):
        let action = decode_action(raw).unwrap();

        // then (期待する結果):
        assert_eq!(action, Action::Hello(name("alice")));
    }

    #[test]
    fn test_decode_select_and_done() {
        assert_eq!(
            decode_action(r#"{"action":"select","payload":"B"}"#).unwrap(),
            Action::Select(Choice::B)
        );
        assert_eq!(
            decode_action(r#"{"action":"done","payload":"alice"}"#).unwrap(),
            Action::Done(name("alice"))
        );
    }

    #[test]
    fn test_decode_lock_and_reset_ignore_payload() {
        // テスト項目: lock / reset は payload が null でも省略されていてもデコードできる
        assert_eq!(
            decode_action(r#"{"action":"lock","payload":null}"#).unwrap(),
            Action::Lock
        );
        assert_eq!(decode_action(r#"{"action":"reset"}"#).unwrap(), Action::Reset);
    }

    #[test]
    fn test_decode_unknown_action_is_unrecognized() {
        // テスト項目: 未知のアクション名はエラーではなく Unrecognized になる
        // given (前提条件):
        let raw = r#"{"action":"unlock","payload":null}"#;

        // when (操作):
        let action = decode_action(raw).unwrap();

        // then (期待する結果):
        assert_eq!(action, Action::Unrecognized("unlock".to_string()));
    }

    #[test]
    fn test_decode_malformed() {
        // テスト項目: envelope として解釈できないメッセージは Malformed になる
        for raw in ["not json", "[1,2,3]", r#"{"payload":"A"}"#, r#"{"action":42}"#] {
            assert!(
                matches!(decode_action(raw), Err(DecodeError::Malformed(_))),
                "expected Malformed for {raw}"
            );
        }
    }

    #[test]
    fn test_decode_invalid_payloads() {
        // テスト項目: 既知のアクションで payload の形が不正な場合は InvalidPayload になる
        let cases = [
            r#"{"action":"select","payload":"C"}"#,
            r#"{"action":"select","payload":{"option":"A"}}"#,
            r#"{"action":"hello","payload":{"name":42}}"#,
            r#"{"action":"hello","payload":{}}"#,
            r#"{"action":"hello","payload":{"name":"   "}}"#,
            r#"{"action":"done","payload":null}"#,
        ];

        for raw in cases {
            assert!(
                matches!(decode_action(raw), Err(DecodeError::InvalidPayload { .. })),
                "expected InvalidPayload for {raw}"
            );
        }
    }

    #[test]
    fn test_encode_initial_snapshot() {
        // テスト項目: 初期状態がワイヤー形式にエンコードされる
        // given (前提条件):
        let state = SharedState::initial();

        // when (操作):
        let json = encode_snapshot(&state).unwrap();

        // then (期待する結果):
        assert_eq!(
            json,
            r#"{"locked":false,"selectedOption":null,"doneBy":[],"lastAction":null,"lastBy":null}"#
        );
    }

    #[test]
    fn test_json_encoder_matches_wire_format() {
        // テスト項目: JsonSnapshotEncoder は encode_snapshot と同じ文字列を返す
        let state = SharedState::initial();
        assert_eq!(
            JsonSnapshotEncoder.encode(&state).unwrap(),
            encode_snapshot(&state).unwrap()
        );
    }

    #[test]
    fn test_encode_populated_snapshot() {
        // given (前提条件):
        let state = SharedState {
            locked: true,
            selected_option: Some(Choice::A),
            done_by: vec![name("alice"), name("bob")],
            last_action: Some(LastAction::Locked),
            last_by: Some(name("alice")),
        };

        // when (操作):
        let dto = SharedStateDto::from(&state);

        // then (期待する結果):
        assert_eq!(
            dto,
            SharedStateDto {
                locked: true,
                selected_option: Some("A".to_string()),
                done_by: vec!["alice".to_string(), "bob".to_string()],
                last_action: Some("locked".to_string()),
                last_by: Some("alice".to_string()),
            }
        );
    }
}
