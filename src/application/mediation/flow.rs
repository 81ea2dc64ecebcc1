//! MediationFlow - Stage controller for the mediation walk-through.
//!
//! The controller is stateless across sessions. Every operation takes the
//! caller's `MediationSession`, checks the cursor, and either mutates the
//! session and returns the new stage or returns an error leaving the
//! session untouched.

use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info, warn};

use super::commands::{IdentifyProblemCommand, ManualResponseCommand, UserPerspectiveCommand};
use crate::adapters::catalog::{BuiltinCatalog, YamlCatalog};
use crate::adapters::content_screen::KeywordContentScreen;
use crate::config::{ConfigError, MediationConfig};
use crate::domain::analysis::ConflictSummary;
use crate::domain::foundation::StateMachine;
use crate::domain::mediation::{
    Case, MediationError, MediationSession, ResponseSource, ResponseSourceChoice,
    SessionSnapshot, Stage, Strategy,
};
use crate::domain::messaging::{compose_messages, MessageTone, ResolutionMessage};
use crate::ports::{ContentScreen, TemplateCatalog};

/// Drives a `MediationSession` through the six stages.
#[derive(Clone)]
pub struct MediationFlow {
    screen: Arc<dyn ContentScreen>,
    catalog: Arc<dyn TemplateCatalog>,
}

impl Default for MediationFlow {
    fn default() -> Self {
        Self::new(
            Arc::new(KeywordContentScreen::default()),
            Arc::new(BuiltinCatalog::new()),
        )
    }
}

impl MediationFlow {
    pub fn new(screen: Arc<dyn ContentScreen>, catalog: Arc<dyn TemplateCatalog>) -> Self {
        Self { screen, catalog }
    }

    /// Builds the controller from configuration.
    ///
    /// Extra keywords are added to the builtin list. A configured catalog
    /// path replaces the builtin catalog.
    ///
    /// # Errors
    ///
    /// - `CatalogFailed` if the catalog file cannot be read or is invalid
    pub fn from_config(config: &MediationConfig) -> Result<Self, ConfigError> {
        let screen =
            KeywordContentScreen::default().with_extra(config.extra_forbidden_keywords_list());

        let catalog: Arc<dyn TemplateCatalog> = match &config.catalog_path {
            Some(path) => {
                let catalog = YamlCatalog::from_path(path)?;
                info!(path = %path.display(), "Loaded template catalog");
                Arc::new(catalog)
            }
            None => Arc::new(BuiltinCatalog::new()),
        };

        Ok(Self::new(Arc::new(screen), catalog))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Stage operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Opens a case from the identification form.
    ///
    /// # Errors
    ///
    /// - `IllegalState` unless the cursor is at `Identification`
    /// - `Validation` with one entry per blank field
    /// - `ContentPolicy` if the problem description is refused
    pub fn submit_identification(
        &self,
        session: &mut MediationSession,
        cmd: IdentifyProblemCommand,
    ) -> Result<Stage, MediationError> {
        const OPERATION: &str = "submit identification";
        require_stage(session, Stage::Identification, OPERATION)?;

        let case = Case::open(&cmd.problem_description, &cmd.counterparty, &cmd.desired_outcome)
            .map_err(|err| rejected(OPERATION, err))?;

        if !self.screen.is_allowed(case.problem_description()) {
            warn!(
                operation = OPERATION,
                field = "problem_description",
                "Problem description refused by content screen"
            );
            return Err(MediationError::content_policy("problem_description"));
        }

        session.replace_case(case);
        advance(session, Stage::UserQuestions, OPERATION)
    }

    /// Records the user's facts, motive theory and past attempts.
    ///
    /// # Errors
    ///
    /// - `IllegalState` unless the cursor is at `UserQuestions`
    /// - `Validation` with one entry per blank field
    pub fn submit_user_perspective(
        &self,
        session: &mut MediationSession,
        cmd: UserPerspectiveCommand,
    ) -> Result<Stage, MediationError> {
        const OPERATION: &str = "submit user perspective";
        require_stage(session, Stage::UserQuestions, OPERATION)?;

        case_mut(session, Stage::UserQuestions, OPERATION)?
            .record_user_perspective(&cmd.facts, &cmd.motive_theory, &cmd.past_attempts)
            .map_err(|err| rejected(OPERATION, err))?;

        advance(session, Stage::ResponseInvitation, OPERATION)
    }

    /// Picks how the counterparty's perspective is collected.
    ///
    /// `Generated` fills the counterparty's answers from the catalog's
    /// response pool using `rng` and moves to `SummaryGeneration`. `Manual`
    /// opens the manual form and leaves the cursor where it is.
    ///
    /// # Errors
    ///
    /// - `IllegalState` unless the cursor is at `ResponseInvitation`
    /// - `Catalog` if the response pool cannot produce an answer
    pub fn choose_response_source<R: Rng + ?Sized>(
        &self,
        session: &mut MediationSession,
        choice: ResponseSourceChoice,
        rng: &mut R,
    ) -> Result<Stage, MediationError> {
        const OPERATION: &str = "choose response source";
        require_stage(session, Stage::ResponseInvitation, OPERATION)?;

        match choice {
            ResponseSourceChoice::Generated => {
                let case = case_mut(session, Stage::ResponseInvitation, OPERATION)?;
                let response = self.catalog.response_pool().generate(case, rng)?;
                case.record_counterparty_response(response, ResponseSource::Generated)?;
                session.set_awaiting_manual_entry(false);
                advance(session, Stage::SummaryGeneration, OPERATION)
            }
            ResponseSourceChoice::Manual => {
                case_mut(session, Stage::ResponseInvitation, OPERATION)?
                    .set_response_source(ResponseSource::Manual);
                session.set_awaiting_manual_entry(true);
                debug!(operation = OPERATION, "Manual response form opened");
                Ok(session.stage())
            }
        }
    }

    /// Records the counterparty's answers typed in by the user.
    ///
    /// # Errors
    ///
    /// - `IllegalState` unless the cursor is at `ResponseInvitation`
    /// - `ManualEntryNotOpen` if the manual option has not been chosen
    /// - `Validation` if facts, motive, past attempts or ideal fix are blank
    pub fn submit_manual_response(
        &self,
        session: &mut MediationSession,
        cmd: ManualResponseCommand,
    ) -> Result<Stage, MediationError> {
        const OPERATION: &str = "submit manual response";
        require_manual_form(session, OPERATION)?;

        case_mut(session, Stage::ResponseInvitation, OPERATION)?
            .record_counterparty_response(cmd.into(), ResponseSource::Manual)
            .map_err(|err| rejected(OPERATION, err))?;

        session.set_awaiting_manual_entry(false);
        advance(session, Stage::SummaryGeneration, OPERATION)
    }

    /// Wipes the manual form back to its defaults. The cursor stays put.
    ///
    /// # Errors
    ///
    /// - `IllegalState` unless the cursor is at `ResponseInvitation`
    /// - `ManualEntryNotOpen` if the manual option has not been chosen
    pub fn clear_manual_response(
        &self,
        session: &mut MediationSession,
    ) -> Result<Stage, MediationError> {
        const OPERATION: &str = "clear manual response";
        require_manual_form(session, OPERATION)?;

        case_mut(session, Stage::ResponseInvitation, OPERATION)?.clear_counterparty_response();
        Ok(session.stage())
    }

    /// Moves from the summary to strategy selection.
    ///
    /// # Errors
    ///
    /// - `IllegalState` unless the cursor is at `SummaryGeneration`
    pub fn advance_to_strategies(
        &self,
        session: &mut MediationSession,
    ) -> Result<Stage, MediationError> {
        const OPERATION: &str = "advance to strategies";
        require_stage(session, Stage::SummaryGeneration, OPERATION)?;
        advance(session, Stage::StrategySelection, OPERATION)
    }

    /// Selects one of the three strategies by its 1-based position.
    ///
    /// # Errors
    ///
    /// - `IllegalState` unless the cursor is at `StrategySelection`
    /// - `Range` if `choice` is outside 1..=3
    /// - `Catalog` if the catalog has no strategy at that position
    pub fn select_strategy(
        &self,
        session: &mut MediationSession,
        choice: usize,
    ) -> Result<Stage, MediationError> {
        const OPERATION: &str = "select strategy";
        require_stage(session, Stage::StrategySelection, OPERATION)?;

        let max = STRATEGY_COUNT as i64;
        if !(1..=STRATEGY_COUNT).contains(&choice) {
            let err = MediationError::range("strategy", 1, max, choice as i64);
            log_rejection(OPERATION, &err);
            return Err(err);
        }

        let strategy = self
            .catalog
            .strategies()
            .get(choice - 1)
            .cloned()
            .ok_or_else(|| {
                MediationError::catalog(format!("no strategy at position {}", choice))
            })?;

        debug!(
            operation = OPERATION,
            strategy = %strategy.name,
            archetype = ?strategy.archetype,
            "Strategy selected"
        );
        session.set_selected_strategy(strategy);
        advance(session, Stage::ResolutionMessages, OPERATION)
    }

    /// Records that the user sent the message with the given tone.
    ///
    /// The cursor stays at `ResolutionMessages`. Marking another tone
    /// replaces the earlier one.
    ///
    /// # Errors
    ///
    /// - `IllegalState` unless the cursor is at `ResolutionMessages`
    /// - `Catalog` if the selected archetype has no template for `tone`
    pub fn mark_message_sent(
        &self,
        session: &mut MediationSession,
        tone: MessageTone,
    ) -> Result<Stage, MediationError> {
        const OPERATION: &str = "mark message sent";
        require_stage(session, Stage::ResolutionMessages, OPERATION)?;

        let archetype = session
            .selected_strategy()
            .map(|strategy| strategy.archetype)
            .ok_or_else(|| {
                MediationError::illegal_state(OPERATION, Stage::ResolutionMessages, session.stage())
            })?;
        let offered = self
            .catalog
            .message_templates(archetype)
            .iter()
            .any(|template| template.tone == tone);
        if !offered {
            return Err(rejected(
                OPERATION,
                MediationError::catalog(format!("no {} message for {}", tone, archetype)),
            ));
        }

        session.set_sent_message(tone);
        let case_id = session.case().map(|case| case.id().to_string());
        info!(
            case_id = case_id.as_deref().unwrap_or("none"),
            tone = %tone,
            "Resolution message marked as sent"
        );
        Ok(session.stage())
    }

    /// Discards the case and returns to identification. Safe at any stage.
    pub fn reset(&self, session: &mut MediationSession) -> Stage {
        let from = session.stage();
        let case_id = session.case().map(|case| case.id().to_string());
        session.clear();
        info!(
            case_id = case_id.as_deref().unwrap_or("none"),
            from = %from,
            "Mediation session reset"
        );
        session.stage()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read-only views
    // ─────────────────────────────────────────────────────────────────────────

    /// Side-by-side summary of both perspectives.
    ///
    /// # Errors
    ///
    /// - `IllegalState` before the cursor reaches `SummaryGeneration`
    pub fn summary(&self, session: &MediationSession) -> Result<ConflictSummary, MediationError> {
        const OPERATION: &str = "view summary";
        if !session.stage().has_reached(&Stage::SummaryGeneration) {
            return Err(MediationError::illegal_state(
                OPERATION,
                Stage::SummaryGeneration,
                session.stage(),
            ));
        }
        let case = session.case().ok_or_else(|| {
            MediationError::illegal_state(OPERATION, Stage::SummaryGeneration, session.stage())
        })?;
        Ok(ConflictSummary::from_case(case))
    }

    /// The strategies offered at the selection stage, in display order.
    pub fn strategies(&self) -> &[Strategy] {
        self.catalog.strategies()
    }

    /// Messages for the selected strategy, ordered Soft, Firm, Direct.
    ///
    /// # Errors
    ///
    /// - `IllegalState` unless the cursor is at `ResolutionMessages`
    /// - `Catalog` if the archetype has no message templates
    pub fn resolution_messages(
        &self,
        session: &MediationSession,
    ) -> Result<Vec<ResolutionMessage>, MediationError> {
        const OPERATION: &str = "view resolution messages";
        require_stage(session, Stage::ResolutionMessages, OPERATION)?;

        let illegal = || {
            MediationError::illegal_state(OPERATION, Stage::ResolutionMessages, session.stage())
        };
        let strategy = session.selected_strategy().ok_or_else(illegal)?;
        let case = session.case().ok_or_else(illegal)?;

        let templates = self.catalog.message_templates(strategy.archetype);
        if templates.is_empty() {
            return Err(MediationError::catalog(format!(
                "no message templates for {}",
                strategy.archetype
            )));
        }

        Ok(compose_messages(strategy, case, templates))
    }

    /// Owned, serializable copy of the session for rendering.
    pub fn snapshot(&self, session: &MediationSession) -> SessionSnapshot {
        session.snapshot()
    }
}

const STRATEGY_COUNT: usize = 3;

fn require_stage(
    session: &MediationSession,
    expected: Stage,
    operation: &'static str,
) -> Result<(), MediationError> {
    if session.stage() == expected {
        Ok(())
    } else {
        let err = MediationError::illegal_state(operation, expected, session.stage());
        log_rejection(operation, &err);
        Err(err)
    }
}

fn require_manual_form(
    session: &MediationSession,
    operation: &'static str,
) -> Result<(), MediationError> {
    require_stage(session, Stage::ResponseInvitation, operation)?;
    if session.awaiting_manual_entry() {
        Ok(())
    } else {
        let err = MediationError::manual_entry_not_open(operation);
        log_rejection(operation, &err);
        Err(err)
    }
}

fn case_mut<'s>(
    session: &'s mut MediationSession,
    expected: Stage,
    operation: &'static str,
) -> Result<&'s mut Case, MediationError> {
    let actual = session.stage();
    session
        .case_mut()
        .ok_or_else(|| MediationError::illegal_state(operation, expected, actual))
}

fn advance(
    session: &mut MediationSession,
    to: Stage,
    operation: &'static str,
) -> Result<Stage, MediationError> {
    let from = session.stage();
    let to = from
        .transition_to(to)
        .map_err(|_| MediationError::illegal_state(operation, to, from))?;
    session.set_stage(to);

    let case_id = session.case().map(|case| case.id().to_string());
    info!(
        case_id = case_id.as_deref().unwrap_or("none"),
        from = %from,
        to = %to,
        "Mediation stage advanced"
    );
    Ok(to)
}

fn log_rejection(operation: &'static str, err: &MediationError) {
    debug!(
        operation,
        code = %err.code(),
        fields = ?err.offending_fields(),
        "Mediation input rejected"
    );
}

fn rejected(operation: &'static str, err: MediationError) -> MediationError {
    log_rejection(operation, &err);
    err
}
