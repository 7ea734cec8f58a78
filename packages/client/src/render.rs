//! Status panel rendering.

use std::io::Write;

use crate::reducer::ClientState;

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";
const RULE: &str = "  ----------------------------------------";
pub const PROMPT: &str = "  > ";

/// Render the status panel for `state`.
pub fn render_panel(state: &ClientState) -> String {
    let mut output = String::new();
    output.push_str(CLEAR_SCREEN);
    output.push_str("\n  Tallyroom\n");
    output.push_str(RULE);
    output.push('\n');

    let connection = if state.connected {
        "connected"
    } else {
        "disconnected"
    };
    output.push_str(&format!("  Connection: {}\n", connection));
    output.push_str(&format!(
        "  Locked:     {}\n",
        if state.locked { "YES" } else { "NO" }
    ));
    output.push_str(&format!(
        "  Selected:   {}\n",
        state.selected_option.as_deref().unwrap_or("(none)")
    ));
    let done = if state.done_by.is_empty() {
        "(none)".to_string()
    } else {
        state.done_by.join(", ")
    };
    output.push_str(&format!("  Done:       {}\n", done));
    output.push_str(&format!("  Last:       {}\n", format_last(state)));

    output.push_str(RULE);
    output.push('\n');
    output.push_str("  Commands: a | b | done | lock | reset | state | help\n\n");
    output
}

fn format_last(state: &ClientState) -> String {
    match (&state.last_action, &state.last_by) {
        (Some(action), Some(by)) => format!("{} ({})", action, by),
        (Some(action), None) => action.clone(),
        _ => "(none)".to_string(),
    }
}

/// Redisplay the prompt after printing asynchronously
pub fn redisplay_prompt() {
    print!("{}", PROMPT);
    std::io::stdout().flush().ok();
}
