//! End-to-end turns through the orchestrator with a real executor

mod common;

use assistant::conversation::{Orchestrator, Session, Turn};
use assistant::AssistantError;
use common::*;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_battery_question() {
    let runner = Arc::new(ScriptedRunner::new().with_output(
        "termux-battery-status",
        r#"{"health": "GOOD", "percentage": 42, "plugged": "UNPLUGGED", "status": "DISCHARGING"}"#,
    ));
    let (_dir, executor) = setup_executor(runner.clone());
    let model = ScriptedModel::new(vec![
        tool_response(vec![tool_use("toolu_1", "get_battery_status", json!({}))]),
        text_response("You're at 42 percent and not charging."),
    ]);
    let orchestrator = Orchestrator::new(model.clone(), executor);
    let mut session = Session::new();

    let answer = orchestrator
        .respond(&mut session, "what's my battery")
        .await
        .unwrap();

    assert_eq!(answer, "You're at 42 percent and not charging.");
    assert_eq!(runner.programs(), vec!["termux-battery-status"]);

    let requests = model.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        last_tool_results(&requests[1]),
        vec![(
            "toolu_1".to_string(),
            "Battery is at 42% and not charging".to_string()
        )]
    );
    assert_eq!(session.len(), 4);
}

#[tokio::test]
async fn test_save_a_note() {
    let runner = Arc::new(ScriptedRunner::new());
    let (dir, executor) = setup_executor(runner);
    let model = ScriptedModel::new(vec![
        tool_response(vec![tool_use(
            "toolu_1",
            "write_note",
            json!({"content": "buy milk"}),
        )]),
        text_response("Saved your note."),
    ]);
    let orchestrator = Orchestrator::new(model.clone(), executor);
    let mut session = Session::new();

    orchestrator
        .respond(&mut session, "save a note saying buy milk")
        .await
        .unwrap();

    let requests = model.requests();
    assert_eq!(
        last_tool_results(&requests[1])[0].1,
        format!("Note saved to {}", FIXED_NOTE)
    );
    let saved = std::fs::read_to_string(dir.path().join(FIXED_NOTE)).unwrap();
    assert_eq!(saved, "buy milk");
}

#[tokio::test]
async fn test_contact_lookup_then_sms() {
    let contacts = json!([
        {"name": "Alice Smith", "number": "+15550001"},
        {"name": "John Doe", "number": "+15550100"}
    ]);
    let runner = Arc::new(
        ScriptedRunner::new()
            .with_output("termux-contact-list", &contacts.to_string())
            .with_output("termux-sms-send", ""),
    );
    let (_dir, executor) = setup_executor(runner.clone());
    let model = ScriptedModel::new(vec![
        tool_response(vec![
            llm::ContentBlock::text("Let me find John."),
            tool_use("toolu_1", "get_contacts", json!({"search": "john"})),
        ]),
        tool_response(vec![tool_use(
            "toolu_2",
            "send_sms",
            json!({"phone_number": "+15550100", "message": "I'm running late"}),
        )]),
        text_response("Told John you're running late."),
    ]);
    let orchestrator = Orchestrator::new(model.clone(), executor);
    let mut session = Session::new();

    let answer = orchestrator
        .respond(&mut session, "text John that I'm late")
        .await
        .unwrap();

    assert_eq!(answer, "Told John you're running late.");
    assert_eq!(
        runner.calls(),
        vec![
            vec!["termux-contact-list".to_string()],
            vec![
                "termux-sms-send".to_string(),
                "-n".to_string(),
                "+15550100".to_string(),
                "I'm running late".to_string()
            ],
        ]
    );

    let requests = model.requests();
    assert_eq!(
        last_tool_results(&requests[1])[0].1,
        "Contacts found:\nJohn Doe: +15550100"
    );
    assert_eq!(
        last_tool_results(&requests[2])[0].1,
        "SMS sent successfully to +15550100"
    );

    // user, two assistant/tool-result pairs, final answer
    let turns = session.turns();
    assert_eq!(turns.len(), 6);
    assert!(matches!(turns[0], Turn::User(_)));
    assert!(matches!(turns[1], Turn::Assistant(_)));
    assert!(matches!(turns[2], Turn::ToolResults(_)));
    assert!(matches!(turns[3], Turn::Assistant(_)));
    assert!(matches!(turns[4], Turn::ToolResults(_)));
    assert!(matches!(turns[5], Turn::Assistant(_)));
}

#[tokio::test]
async fn test_session_carries_over_between_turns() {
    let runner = Arc::new(ScriptedRunner::new());
    let (_dir, executor) = setup_executor(runner);
    let model = ScriptedModel::new(vec![text_response("Hi!"), text_response("Sure.")]);
    let orchestrator = Orchestrator::new(model.clone(), executor);
    let mut session = Session::new();

    orchestrator.respond(&mut session, "hello").await.unwrap();
    orchestrator.respond(&mut session, "again").await.unwrap();

    let requests = model.requests();
    assert_eq!(requests[0].messages.len(), 1);
    assert_eq!(requests[1].messages.len(), 3);
    assert_eq!(requests[1].messages[1].text(), "Hi!");
}

#[tokio::test]
async fn test_endless_tool_requests_are_cut_off() {
    let runner = Arc::new(ScriptedRunner::new());
    let (_dir, executor) = setup_executor(runner);
    let responses = (0..5)
        .map(|i| tool_response(vec![tool_use(&format!("toolu_{}", i), "list_notes", json!({}))]))
        .collect();
    let model = ScriptedModel::new(responses);
    let orchestrator = Orchestrator::new(model.clone(), executor).with_max_tool_rounds(3);
    let mut session = Session::new();

    let err = orchestrator
        .respond(&mut session, "keep listing")
        .await
        .unwrap_err();

    assert!(matches!(err, AssistantError::ToolLoopExceeded { rounds: 3 }));
    assert_eq!(model.requests().len(), 4);
    assert_eq!(
        last_tool_results(&model.requests()[1])[0].1,
        "No notes saved yet"
    );
}

#[tokio::test]
async fn test_unknown_tool_is_reported_to_model() {
    let runner = Arc::new(ScriptedRunner::new());
    let (_dir, executor) = setup_executor(runner.clone());
    let model = ScriptedModel::new(vec![
        tool_response(vec![tool_use("toolu_1", "launch_rocket", json!({}))]),
        text_response("I can't do that."),
    ]);
    let orchestrator = Orchestrator::new(model.clone(), executor);
    let mut session = Session::new();

    orchestrator.respond(&mut session, "launch").await.unwrap();

    assert_eq!(
        last_tool_results(&model.requests()[1])[0].1,
        "Unknown tool: launch_rocket"
    );
    assert!(runner.calls().is_empty());
}
