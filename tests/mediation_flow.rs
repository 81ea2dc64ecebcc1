//! Integration tests for the mediation flow.
//!
//! These tests drive a `MediationSession` through the public controller:
//! 1. Identification opens a case (or refuses it)
//! 2. The user's perspective is recorded
//! 3. The counterparty's view is generated or entered by hand
//! 4. The summary, strategy selection and resolution messages follow
//!
//! Uses the builtin catalog and a seeded rng so every run is reproducible.

use std::io::Write;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use conflict_mediator::adapters::{BuiltinCatalog, KeywordContentScreen, YamlCatalog};
use conflict_mediator::application::{
    IdentifyProblemCommand, ManualResponseCommand, MediationFlow, UserPerspectiveCommand,
};
use conflict_mediator::domain::foundation::ErrorCode;
use conflict_mediator::domain::mediation::{
    Archetype, MediationError, MediationSession, ResponseSource, ResponseSourceChoice, Stage,
};
use conflict_mediator::domain::messaging::MessageTone;
use conflict_mediator::ports::{ContentScreen, TemplateCatalog};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn rng() -> StdRng {
    StdRng::seed_from_u64(2024)
}

fn identify(flow: &MediationFlow, session: &mut MediationSession) {
    flow.submit_identification(
        session,
        IdentifyProblemCommand::new(
            "My roommate never does their share of the chores",
            "Jordan",
            "An even split of housework",
        ),
    )
    .unwrap();
}

fn answer(flow: &MediationFlow, session: &mut MediationSession, facts: &str) {
    flow.submit_user_perspective(
        session,
        UserPerspectiveCommand::new(facts, "They think I will just do it", "Left notes"),
    )
    .unwrap();
}

fn manual_answers() -> ManualResponseCommand {
    ManualResponseCommand {
        facts: "I cook most nights".to_string(),
        motive_theory: "I feel overwhelmed. Work is busy".to_string(),
        past_attempts: "Offered to swap tasks".to_string(),
        frustration_level: 6,
        ideal_fix: "A rota we both agree on".to_string(),
        misunderstandings: "What counts as a chore".to_string(),
        impact: "Tension at home".to_string(),
        willing_to_compromise: true,
    }
}

/// Session at ResponseInvitation with the user's view recorded.
fn invited(flow: &MediationFlow) -> MediationSession {
    let mut session = MediationSession::new();
    identify(flow, &mut session);
    answer(flow, &mut session, "Dishes on Monday and Friday stayed dirty");
    session
}

/// Session at StrategySelection via the generated path.
fn at_strategies(flow: &MediationFlow) -> MediationSession {
    let mut session = invited(flow);
    flow.choose_response_source(&mut session, ResponseSourceChoice::Generated, &mut rng())
        .unwrap();
    flow.advance_to_strategies(&mut session).unwrap();
    session
}

/// Session whose cursor sits at `stage`, reached through the public flow.
/// At `ResponseInvitation` the manual form is closed.
fn session_at(flow: &MediationFlow, stage: Stage) -> MediationSession {
    match stage {
        Stage::Identification => MediationSession::new(),
        Stage::UserQuestions => {
            let mut session = MediationSession::new();
            identify(flow, &mut session);
            session
        }
        Stage::ResponseInvitation => invited(flow),
        Stage::SummaryGeneration => {
            let mut session = invited(flow);
            flow.choose_response_source(&mut session, ResponseSourceChoice::Generated, &mut rng())
                .unwrap();
            session
        }
        Stage::StrategySelection => at_strategies(flow),
        Stage::ResolutionMessages => {
            let mut session = at_strategies(flow);
            flow.select_strategy(&mut session, 1).unwrap();
            session
        }
    }
}

/// Every cursor-moving operation, paired with the stage that owns it.
#[derive(Debug, Clone, Copy)]
enum Operation {
    SubmitIdentification,
    SubmitUserPerspective,
    ChooseGenerated,
    ChooseManual,
    SubmitManualResponse,
    ClearManualResponse,
    AdvanceToStrategies,
    SelectStrategy,
    MarkMessageSent,
}

impl Operation {
    const ALL: [Operation; 9] = [
        Operation::SubmitIdentification,
        Operation::SubmitUserPerspective,
        Operation::ChooseGenerated,
        Operation::ChooseManual,
        Operation::SubmitManualResponse,
        Operation::ClearManualResponse,
        Operation::AdvanceToStrategies,
        Operation::SelectStrategy,
        Operation::MarkMessageSent,
    ];

    fn owning_stage(self) -> Stage {
        match self {
            Operation::SubmitIdentification => Stage::Identification,
            Operation::SubmitUserPerspective => Stage::UserQuestions,
            Operation::ChooseGenerated
            | Operation::ChooseManual
            | Operation::SubmitManualResponse
            | Operation::ClearManualResponse => Stage::ResponseInvitation,
            Operation::AdvanceToStrategies => Stage::SummaryGeneration,
            Operation::SelectStrategy => Stage::StrategySelection,
            Operation::MarkMessageSent => Stage::ResolutionMessages,
        }
    }

    fn run(
        self,
        flow: &MediationFlow,
        session: &mut MediationSession,
    ) -> Result<Stage, MediationError> {
        match self {
            Operation::SubmitIdentification => flow.submit_identification(
                session,
                IdentifyProblemCommand::new("Noise after midnight", "Sam", "Quiet weeknights"),
            ),
            Operation::SubmitUserPerspective => flow.submit_user_perspective(
                session,
                UserPerspectiveCommand::new("Music at 2am", "Does not care", "Knocked"),
            ),
            Operation::ChooseGenerated => {
                flow.choose_response_source(session, ResponseSourceChoice::Generated, &mut rng())
            }
            Operation::ChooseManual => {
                flow.choose_response_source(session, ResponseSourceChoice::Manual, &mut rng())
            }
            Operation::SubmitManualResponse => {
                flow.submit_manual_response(session, manual_answers())
            }
            Operation::ClearManualResponse => flow.clear_manual_response(session),
            Operation::AdvanceToStrategies => flow.advance_to_strategies(session),
            Operation::SelectStrategy => flow.select_strategy(session, 2),
            Operation::MarkMessageSent => flow.mark_message_sent(session, MessageTone::Soft),
        }
    }
}

/// Screen that refuses everything, to prove the flow consults the port.
struct RefuseAll;

impl ContentScreen for RefuseAll {
    fn first_match(&self, _text: &str) -> Option<&str> {
        Some("anything")
    }
}

// =============================================================================
// Identification
// =============================================================================

#[test]
fn identification_creates_case_with_unique_id() {
    let flow = MediationFlow::default();

    let mut first = MediationSession::new();
    let mut second = MediationSession::new();
    identify(&flow, &mut first);
    identify(&flow, &mut second);

    assert_eq!(first.stage(), Stage::UserQuestions);
    let a = first.case().unwrap();
    let b = second.case().unwrap();
    assert_ne!(a.id(), b.id());
    assert_eq!(a.counterparty_label(), "Jordan");
    assert_eq!(a.response_source(), ResponseSource::Unset);
}

#[test]
fn empty_identification_field_keeps_cursor() {
    let flow = MediationFlow::default();
    let mut session = MediationSession::new();

    let err = flow
        .submit_identification(
            &mut session,
            IdentifyProblemCommand::new("Noise at night", "Sam", "   "),
        )
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::ValidationFailed);
    assert_eq!(err.offending_fields(), vec!["desired_outcome"]);
    assert_eq!(session.stage(), Stage::Identification);
    assert!(session.case().is_none());
}

#[test]
fn harmful_problem_is_refused_without_case() {
    let flow = MediationFlow::default();
    let mut session = MediationSession::new();

    let err = flow
        .submit_identification(
            &mut session,
            IdentifyProblemCommand::new("I want to hurt him", "Bob", "peace"),
        )
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::ContentPolicyViolation);
    assert_eq!(
        err.to_string(),
        "This appears to involve illegal activity. Please seek professional help or contact authorities."
    );
    assert!(session.case().is_none());
    assert_eq!(session.stage(), Stage::Identification);
}

#[test]
fn flow_consults_injected_screen() {
    let flow = MediationFlow::new(Arc::new(RefuseAll), Arc::new(BuiltinCatalog::new()));
    let mut session = MediationSession::new();

    let result = flow.submit_identification(
        &mut session,
        IdentifyProblemCommand::new("Shared fridge space", "Ali", "A shelf each"),
    );

    assert!(matches!(result, Err(MediationError::ContentPolicy { .. })));
}

// =============================================================================
// Counterparty response
// =============================================================================

#[test]
fn manual_round_trip_reaches_summary() {
    let flow = MediationFlow::default();
    let mut session = invited(&flow);

    flow.choose_response_source(&mut session, ResponseSourceChoice::Manual, &mut rng())
        .unwrap();
    assert_eq!(session.stage(), Stage::ResponseInvitation);
    assert!(session.awaiting_manual_entry());

    let stage = flow
        .submit_manual_response(&mut session, manual_answers())
        .unwrap();

    assert_eq!(stage, Stage::SummaryGeneration);
    assert!(!session.awaiting_manual_entry());
    let case = session.case().unwrap();
    assert_eq!(case.response_source(), ResponseSource::Manual);
    assert_eq!(case.counterparty().frustration_level.value(), 6);
    assert!(case.counterparty().willing_to_compromise);
}

#[test]
fn manual_frustration_is_clamped() {
    let flow = MediationFlow::default();
    let mut session = invited(&flow);
    flow.choose_response_source(&mut session, ResponseSourceChoice::Manual, &mut rng())
        .unwrap();

    flow.submit_manual_response(
        &mut session,
        ManualResponseCommand {
            frustration_level: 99,
            ..manual_answers()
        },
    )
    .unwrap();

    assert_eq!(
        session.case().unwrap().counterparty().frustration_level.value(),
        10
    );
}

#[test]
fn generated_path_fills_every_counterparty_field() {
    let flow = MediationFlow::default();
    let mut session = invited(&flow);

    let stage = flow
        .choose_response_source(&mut session, ResponseSourceChoice::Generated, &mut rng())
        .unwrap();

    assert_eq!(stage, Stage::SummaryGeneration);
    let case = session.case().unwrap();
    let response = case.counterparty();
    assert_eq!(case.response_source(), ResponseSource::Generated);
    for text in [
        &response.facts,
        &response.motive_theory,
        &response.past_attempts,
        &response.ideal_fix,
        &response.misunderstandings,
        &response.impact,
    ] {
        assert!(!text.is_empty());
        assert!(!text.contains("{fact_"));
    }
    assert!((4..=8).contains(&response.frustration_level.value()));
}

#[test]
fn generated_path_is_reproducible_with_same_seed() {
    let flow = MediationFlow::default();
    let mut a = invited(&flow);
    let mut b = invited(&flow);

    flow.choose_response_source(&mut a, ResponseSourceChoice::Generated, &mut rng())
        .unwrap();
    flow.choose_response_source(&mut b, ResponseSourceChoice::Generated, &mut rng())
        .unwrap();

    assert_eq!(
        a.case().unwrap().counterparty(),
        b.case().unwrap().counterparty()
    );
}

#[test]
fn generated_path_handles_short_user_facts() {
    let flow = MediationFlow::default();
    let mut session = MediationSession::new();
    identify(&flow, &mut session);
    answer(&flow, &mut session, "Dishes");

    for seed in 0..20 {
        let mut attempt = session.clone();
        flow.choose_response_source(
            &mut attempt,
            ResponseSourceChoice::Generated,
            &mut StdRng::seed_from_u64(seed),
        )
        .unwrap();
        assert!(!attempt.case().unwrap().counterparty().facts.contains('{'));
    }
}

// =============================================================================
// Summary
// =============================================================================

#[test]
fn agreement_rate_is_zero_or_hundred_at_extremes() {
    let flow = MediationFlow::default();
    let facts = "dishes left in the sink";
    let mut session = MediationSession::new();
    identify(&flow, &mut session);
    answer(&flow, &mut session, facts);
    flow.choose_response_source(&mut session, ResponseSourceChoice::Manual, &mut rng())
        .unwrap();
    flow.submit_manual_response(
        &mut session,
        ManualResponseCommand {
            facts: facts.to_uppercase(),
            ..manual_answers()
        },
    )
    .unwrap();

    let summary = flow.summary(&session).unwrap();
    assert_eq!(summary.agreement_rate.value(), 100);
    assert_eq!(summary.rows.len(), 4);
    assert_eq!(summary.response_source, ResponseSource::Manual);
    assert!(summary.rows[0]
        .common_ground
        .starts_with("Both mention: dishes, in, left"));
}

#[test]
fn summary_unavailable_before_both_views() {
    let flow = MediationFlow::default();
    let session = invited(&flow);

    let err = flow.summary(&session).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
}

#[test]
fn summary_stays_readable_after_strategy_selection() {
    let flow = MediationFlow::default();
    let mut session = at_strategies(&flow);
    flow.select_strategy(&mut session, 1).unwrap();

    assert!(flow.summary(&session).is_ok());
}

// =============================================================================
// Strategies and messages
// =============================================================================

#[test]
fn select_strategy_out_of_range_is_rejected() {
    let flow = MediationFlow::default();
    let mut session = at_strategies(&flow);

    let err = flow.select_strategy(&mut session, 4).unwrap_err();

    assert_eq!(
        err,
        MediationError::Range {
            field: "strategy".to_string(),
            min: 1,
            max: 3,
            actual: 4,
        }
    );
    assert_eq!(session.stage(), Stage::StrategySelection);
    assert!(session.selected_strategy().is_none());
}

#[test]
fn select_second_strategy_is_assertive() {
    let flow = MediationFlow::default();
    let mut session = at_strategies(&flow);

    let stage = flow.select_strategy(&mut session, 2).unwrap();

    assert_eq!(stage, Stage::ResolutionMessages);
    assert_eq!(
        session.selected_strategy().unwrap().archetype,
        Archetype::Assertive
    );
}

#[test]
fn collaborative_messages_are_personalised() {
    let flow = MediationFlow::default();
    let mut session = at_strategies(&flow);
    flow.select_strategy(&mut session, 1).unwrap();

    let messages = flow.resolution_messages(&session).unwrap();
    let tones: Vec<MessageTone> = messages.iter().map(|m| m.tone).collect();

    assert_eq!(tones, vec![MessageTone::Soft, MessageTone::Firm, MessageTone::Direct]);
    let soft = &messages[0].content;
    assert!(soft.starts_with("Hi Jordan,"));
    assert!(soft.contains("our situation with shared chores"));
    assert!(soft.contains("a shared responsibility system for 30 days"));
    assert!(soft.contains("me an even split of housework"));
    assert!(messages
        .iter()
        .all(|m| !m.content.contains("{counterparty}")));
    assert!(messages[1].content.contains("[date 3 days from now]"));
}

#[test]
fn exit_firm_message_names_last_step_word() {
    let flow = MediationFlow::default();
    let mut session = at_strategies(&flow);
    flow.select_strategy(&mut session, 3).unwrap();

    let messages = flow.resolution_messages(&session).unwrap();

    assert_eq!(
        messages[1].content,
        "Boundary proposal: Create written agreement on essential shared responsibilities only, nothing extra. No response = agreement by cooperation."
    );
}

#[test]
fn strategies_are_listed_in_archetype_order() {
    let flow = MediationFlow::default();
    let archetypes: Vec<Archetype> = flow.strategies().iter().map(|s| s.archetype).collect();
    assert_eq!(archetypes, Archetype::all().to_vec());
}

// =============================================================================
// Cursor guard
// =============================================================================

#[test]
fn every_operation_is_illegal_outside_its_stage() {
    let flow = MediationFlow::default();

    for &stage in Stage::all() {
        let session = session_at(&flow, stage);
        assert_eq!(session.stage(), stage);

        for op in Operation::ALL {
            if op.owning_stage() == stage {
                continue;
            }
            let mut attempt = session.clone();

            let err = op.run(&flow, &mut attempt).unwrap_err();

            assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
            match err {
                MediationError::IllegalState {
                    expected, actual, ..
                } => {
                    assert_eq!(expected, op.owning_stage(), "{:?} at {:?}", op, stage);
                    assert_eq!(actual, stage, "{:?} at {:?}", op, stage);
                }
                other => panic!("{:?} at {:?} returned {:?}", op, stage, other),
            }
            assert_eq!(attempt, session, "{:?} at {:?} changed the session", op, stage);
        }
    }
}

#[test]
fn every_operation_succeeds_at_its_own_stage() {
    let flow = MediationFlow::default();

    for op in Operation::ALL {
        let mut session = session_at(&flow, op.owning_stage());
        if matches!(
            op,
            Operation::SubmitManualResponse | Operation::ClearManualResponse
        ) {
            flow.choose_response_source(&mut session, ResponseSourceChoice::Manual, &mut rng())
                .unwrap();
        }

        assert!(op.run(&flow, &mut session).is_ok(), "{:?} failed", op);
    }
}

#[test]
fn manual_operations_need_the_manual_option_first() {
    let flow = MediationFlow::default();
    let session = session_at(&flow, Stage::ResponseInvitation);

    for op in [Operation::SubmitManualResponse, Operation::ClearManualResponse] {
        let mut attempt = session.clone();

        let err = op.run(&flow, &mut attempt).unwrap_err();

        assert!(matches!(err, MediationError::ManualEntryNotOpen { .. }));
        assert!(err.to_string().contains("choose the manual option first"));
        assert_eq!(attempt, session);
    }
}

#[test]
fn views_are_illegal_before_their_stage() {
    let flow = MediationFlow::default();

    for &stage in Stage::all() {
        let session = session_at(&flow, stage);

        assert_eq!(
            flow.summary(&session).is_ok(),
            stage.has_reached(&Stage::SummaryGeneration),
            "summary at {:?}",
            stage
        );
        assert_eq!(
            flow.resolution_messages(&session).is_ok(),
            stage == Stage::ResolutionMessages,
            "resolution messages at {:?}",
            stage
        );
    }
}

// =============================================================================
// Reset and snapshots
// =============================================================================

#[test]
fn reset_from_every_reachable_stage() {
    let flow = MediationFlow::default();

    let mut sessions = vec![MediationSession::new()];
    let mut session = MediationSession::new();
    identify(&flow, &mut session);
    sessions.push(session.clone());
    answer(&flow, &mut session, "Dishes on Monday");
    sessions.push(session.clone());
    flow.choose_response_source(&mut session, ResponseSourceChoice::Manual, &mut rng())
        .unwrap();
    sessions.push(session.clone());
    flow.submit_manual_response(&mut session, manual_answers())
        .unwrap();
    sessions.push(session.clone());
    flow.advance_to_strategies(&mut session).unwrap();
    sessions.push(session.clone());
    flow.select_strategy(&mut session, 1).unwrap();
    sessions.push(session.clone());
    flow.mark_message_sent(&mut session, MessageTone::Direct)
        .unwrap();
    sessions.push(session);

    for mut session in sessions {
        assert_eq!(flow.reset(&mut session), Stage::Identification);
        assert_eq!(flow.reset(&mut session), Stage::Identification);
        assert!(session.case().is_none());
        assert!(session.selected_strategy().is_none());
        assert!(!session.awaiting_manual_entry());
        assert!(session.sent_message().is_none());
    }
}

#[test]
fn snapshot_serializes_for_rendering() {
    let flow = MediationFlow::default();
    let mut session = at_strategies(&flow);
    flow.select_strategy(&mut session, 2).unwrap();

    let json = serde_json::to_value(flow.snapshot(&session)).unwrap();

    assert_eq!(json["stage"], "resolution_messages");
    assert_eq!(json["selected_strategy"]["archetype"], "assertive");
    assert_eq!(json["case"]["counterparty_label"], "Jordan");
    assert_eq!(json["awaiting_manual_entry"], false);
    assert_eq!(json["sent_message"], serde_json::Value::Null);

    flow.mark_message_sent(&mut session, MessageTone::Firm)
        .unwrap();
    let json = serde_json::to_string(&flow.snapshot(&session)).unwrap();
    let restored: MediationSession = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, session);
    assert_eq!(restored.sent_message(), Some(MessageTone::Firm));
}

#[test]
fn restored_session_must_match_its_cursor() {
    let flow = MediationFlow::default();
    let json = serde_json::to_value(flow.snapshot(&session_at(&flow, Stage::UserQuestions)))
        .unwrap();

    let mut without_case = json.clone();
    without_case["case"] = serde_json::Value::Null;
    assert!(serde_json::from_value::<MediationSession>(without_case).is_err());

    let mut bad_frustration = json;
    bad_frustration["case"]["counterparty"]["frustration_level"] = serde_json::json!(200);
    assert!(serde_json::from_value::<MediationSession>(bad_frustration).is_err());
}

// =============================================================================
// Custom collaborators
// =============================================================================

#[test]
fn yaml_catalog_drives_the_flow() {
    let mut exported = YamlCatalog::from_catalog(&BuiltinCatalog::new())
        .to_yaml()
        .unwrap();
    exported = exported.replace("Framed Benefit Approach", "Quiet Leverage");

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(exported.as_bytes()).unwrap();
    let catalog = YamlCatalog::from_path(file.path()).unwrap();

    let flow = MediationFlow::new(Arc::new(KeywordContentScreen::default()), Arc::new(catalog));
    let mut session = at_strategies(&flow);
    flow.select_strategy(&mut session, 2).unwrap();

    assert_eq!(session.selected_strategy().unwrap().name, "Quiet Leverage");
    let firm = &flow.resolution_messages(&session).unwrap()[1];
    assert!(firm.content.contains("Propose Quiet Leverage. Reply?"));
}

#[test]
fn builtin_catalog_is_valid_yaml_source() {
    let exported = YamlCatalog::from_catalog(&BuiltinCatalog::new());
    assert!(exported.validate().is_ok());
    assert_eq!(
        exported.message_templates(Archetype::Collaborative).len(),
        3
    );
}
