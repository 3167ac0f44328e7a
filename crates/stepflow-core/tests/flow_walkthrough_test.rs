//! End-to-end walkthrough of a flow invocation: enter, validate, step
//! through, temp-save, resume from the saved snapshot, and complete.

use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use stepflow_core::domain::repository::memory::MemoryDraftSnapshotRepository;
use stepflow_core::{
    DraftData, DraftSnapshotRepository, FlowDefinition, FlowId, FlowShell, FlowStatus,
    StepDefinition, StepValidator,
};

fn key_validator(key: &'static str) -> Arc<dyn StepValidator> {
    Arc::new(move |draft: &DraftData| draft.as_value()[key].as_bool().unwrap_or(false))
}

fn intake_flow() -> Arc<FlowDefinition> {
    Arc::new(FlowDefinition::new(
        FlowId("intake".to_string()),
        "Intake",
        vec![
            StepDefinition::new(1, "Details", "details")
                .with_temp_save()
                .with_validator(key_validator("details_ok")),
            StepDefinition::new(2, "Items", "items")
                .with_temp_save()
                .with_validator(key_validator("items_ok")),
            StepDefinition::new(3, "Review", "review").with_terminal(),
        ],
    ))
}

#[tokio::test]
async fn full_walkthrough_with_temp_save_and_resume() {
    let repo = MemoryDraftSnapshotRepository::new();

    // Enter the flow and fill in the first step
    let mut shell = FlowShell::new(intake_flow(), DraftData::empty()).unwrap();
    assert!(!shell.can_next());
    shell.merge_draft(json!({"details_ok": true, "customer": "Bat"}));
    assert!(shell.can_next());
    shell.next().unwrap();
    assert_eq!(shell.current_step(), 2);

    // Park the flow for later
    let snapshot = shell.temp_save().unwrap();
    repo.save(&snapshot).await.unwrap();
    drop(shell);

    // Resume and finish
    let saved = repo
        .find_by_id(&snapshot.instance_id)
        .await
        .unwrap()
        .expect("snapshot was saved");
    let mut shell = FlowShell::resume(intake_flow(), saved).unwrap();
    assert_eq!(shell.current_step(), 2);
    assert_eq!(shell.draft().as_value()["customer"], "Bat");

    shell.merge_draft(json!({"items_ok": true, "items": ["sneaker wash"]}));
    shell.next().unwrap();
    assert_eq!(shell.current_step(), 3);

    // Review step has no validator, so completing is immediately allowed
    shell.next().unwrap();
    assert_eq!(shell.status, FlowStatus::Completed);

    let events = shell.take_events();
    let completed = events
        .iter()
        .find(|e| e.event_type() == "flow.completed")
        .expect("completion event recorded");
    assert_eq!(completed.flow_instance_id(), &snapshot.instance_id);

    // The snapshot is no longer needed once the flow completed
    repo.delete(&snapshot.instance_id).await.unwrap();
    assert!(repo.find_by_id(&snapshot.instance_id).await.unwrap().is_none());
}

#[test]
fn event_sequence_over_a_session() {
    let mut shell = FlowShell::new(intake_flow(), DraftData::empty()).unwrap();

    shell.merge_draft(json!({"details_ok": true}));
    shell.next().unwrap();
    shell.back().unwrap();
    shell.next().unwrap();
    let _ = shell.temp_save().unwrap();

    let types: Vec<&str> = shell.take_events().iter().map(|e| e.event_type()).collect();
    assert_eq!(
        types,
        vec![
            "flow.step_changed",
            "flow.step_changed",
            "flow.step_changed",
            "flow.draft_saved",
        ]
    );
}

#[test]
fn abandoning_from_the_first_step() {
    let mut shell = FlowShell::new(intake_flow(), DraftData::empty()).unwrap();

    shell.back().unwrap();
    assert_eq!(shell.status, FlowStatus::Abandoned);
    assert_eq!(shell.current_step(), 1);

    let events = shell.take_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type(), "flow.abandoned");
}
