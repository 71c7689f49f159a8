//! Result diagnostics
//!
//! Nothing here asserts on conversation content; results are reported, not
//! graded.

use agent_scenario::ScenarioResult;
use comfy_table::{ContentArrangement, Table};
use tracing::info;

/// Log the outcome of a run
pub fn inspect_result(name: &str, result: &ScenarioResult) {
    info!(scenario = name, success = result.success, "Result");

    if let Some(error) = &result.error {
        info!(scenario = name, %error, "Error");
    }
    if let Some(reasoning) = &result.reasoning {
        info!(scenario = name, %reasoning, "Reasoning");
    }
    if let Some(judgment) = &result.judgment {
        info!(scenario = name, verdict = ?judgment.verdict, "Judgment");
    }
}

/// Log that the multi-agent simulation completed, with its message count
pub fn check_multi_agent_response(result: &ScenarioResult) {
    info!(success = result.success, "Simulation completed");
    if !result.messages.is_empty() {
        info!(total = result.message_count(), "Total messages");
    }
}

/// One row per scenario run
pub fn summary_table<'a, I>(results: I) -> Table
where
    I: IntoIterator<Item = (&'a str, &'a ScenarioResult)>,
{
    let mut table = Table::new();
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Scenario", "Success", "Turns", "Messages", "Agent time", "Total time", "Notes"]);

    for (name, result) in results {
        let notes = result
            .error
            .as_deref()
            .or(result.reasoning.as_deref())
            .unwrap_or_default();
        table.add_row(vec![
            name.to_string(),
            result.success.to_string(),
            result.turns.to_string(),
            result.message_count().to_string(),
            format!("{:.2?}", result.agent_time),
            format!("{:.2?}", result.total_time),
            notes.to_string(),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::ConversationMessage;

    #[test]
    fn test_summary_table() {
        let passed = ScenarioResult {
            success: true,
            messages: vec![ConversationMessage::user("q"), ConversationMessage::assistant("a")],
            turns: 1,
            ..ScenarioResult::default()
        };
        let failed = ScenarioResult {
            reasoning: Some("Reached maximum turns (2) without conclusion".to_string()),
            turns: 2,
            ..ScenarioResult::default()
        };

        let table = summary_table([("simple agent test", &passed), ("dynamic agent selection", &failed)]);
        assert_eq!(table.row_count(), 2);

        let rendered = table.to_string();
        assert!(rendered.contains("simple agent test"));
        assert!(rendered.contains("Reached maximum turns"));
    }

    #[test]
    fn test_inspection_handles_empty_result() {
        let result = ScenarioResult::default();
        inspect_result("empty", &result);
        check_multi_agent_response(&result);
    }
}
