//! Settings, terms, and game-definition validation
//!
//! Single-field checks raise a field-tagged error the form layer uses to
//! highlight the offending input; cross-field checks run over the whole
//! settings bundle. [`related_fields`] records which other fields' displayed
//! errors must be cleared when a field changes, since interdependent fields
//! invalidate each other's results.

use thiserror::Error;

use shared::{Lamports, MAX_GAME_OPTIONS, MAX_PROFIT_SHARES, MAX_STAKE_BUTTONS};

use crate::domain::{
    ConfigSettings, DefinitionDraft, GameOption, GameSettings, ProfitShare, SystemConfig, Terms,
    TermsDraft,
};

/// Form field an error is reported against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsField {
    Fee,
    FireThreshold,
    MinStake,
    MinStep,
    Domain,
    /// The `id` field of the terms form itself
    Id,
    Title,
    Description,
    Options,
    ProfitSharing,
    StakeButtons,
    /// A game's reference to a terms entry
    TermsId,
    OpenTime,
    CloseTime,
    SettleTime,
}

impl SettingsField {
    /// Form input name, as the front end identifies fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingsField::Fee => "fee",
            SettingsField::FireThreshold => "fireThreshold",
            SettingsField::MinStake => "minStake",
            SettingsField::MinStep => "minStep",
            SettingsField::Domain => "domain",
            SettingsField::Id => "id",
            SettingsField::Title => "title",
            SettingsField::Description => "description",
            SettingsField::Options => "options",
            SettingsField::ProfitSharing => "profitSharing",
            SettingsField::StakeButtons => "stakeButtons",
            SettingsField::TermsId => "termsId",
            SettingsField::OpenTime => "openTime",
            SettingsField::CloseTime => "closeTime",
            SettingsField::SettleTime => "settleTime",
        }
    }
}

impl std::fmt::Display for SettingsField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Field-tagged validation error, caught by the settings form to highlight
/// the offending input; never fatal
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{field}: {message}")]
pub struct SettingsError {
    pub field: SettingsField,
    pub message: String,
}

impl SettingsError {
    fn new(field: SettingsField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

const MAX_SETTING_SOL: u64 = 100_000;

/// "1st", "2nd", "3rd", "4th", ...
fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Restricted base-58 alphabet (no 'I', 'O', 'l', '0')
fn is_base58(value: &str) -> bool {
    const ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
    value.chars().all(|c| ALPHABET.contains(c))
}

fn is_ascii_alphanumeric(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_alphanumeric())
}

fn short_key(key: &str) -> String {
    if key.len() <= 8 {
        key.to_string()
    } else {
        format!("{}...{}", &key[..4], &key[key.len() - 4..])
    }
}

pub fn validate_fee(fee: f64) -> Result<(), SettingsError> {
    if !(0.0..=100.0).contains(&fee) {
        return Err(SettingsError::new(
            SettingsField::Fee,
            "Fee must be between 0% and 100%",
        ));
    }
    Ok(())
}

pub fn validate_fire_threshold(value: Lamports) -> Result<(), SettingsError> {
    if value > Lamports::from_sol(MAX_SETTING_SOL) {
        return Err(SettingsError::new(
            SettingsField::FireThreshold,
            "Fire threshold must be between 0 and 100,000",
        ));
    }
    Ok(())
}

pub fn validate_min_stake(value: Lamports) -> Result<(), SettingsError> {
    if value > Lamports::from_sol(MAX_SETTING_SOL) {
        return Err(SettingsError::new(
            SettingsField::MinStake,
            "Minimum stake must be between 0 and 100,000",
        ));
    }
    Ok(())
}

pub fn validate_min_step(value: Lamports) -> Result<(), SettingsError> {
    if value > Lamports::from_sol(MAX_SETTING_SOL) {
        return Err(SettingsError::new(
            SettingsField::MinStep,
            "Minimum stake step must be between 0 and 100,000",
        ));
    }
    Ok(())
}

pub fn validate_domain(value: &str) -> Result<(), SettingsError> {
    if value.len() < 5 || value.len() > 32 {
        return Err(SettingsError::new(
            SettingsField::Domain,
            "Invalid domain (max 32 char)",
        ));
    }
    Ok(())
}

pub fn validate_terms_id(value: &str) -> Result<(), SettingsError> {
    if value.is_empty() || value.len() > 4 {
        let error = if value.is_empty() {
            "empty"
        } else {
            "longer than 4 characters"
        };
        return Err(SettingsError::new(
            SettingsField::Id,
            format!("Terms ID cannot be {error}"),
        ));
    }
    if !is_ascii_alphanumeric(value) {
        return Err(SettingsError::new(
            SettingsField::Id,
            "Terms ID can only contain up to 4 alphanumeric Ascii characters: a-z, A-Z, 0-9",
        ));
    }
    Ok(())
}

pub fn validate_terms_title(value: &str) -> Result<(), SettingsError> {
    if value.is_empty() || value.len() > 64 {
        let error = if value.is_empty() {
            "empty"
        } else {
            "longer than 64 characters"
        };
        return Err(SettingsError::new(
            SettingsField::Title,
            format!("Terms title cannot be {error}"),
        ));
    }
    Ok(())
}

pub fn validate_terms_description(value: &str) -> Result<(), SettingsError> {
    if value.is_empty() || value.len() > 1000 {
        let error = if value.is_empty() {
            "empty"
        } else {
            "longer than 1000 characters"
        };
        return Err(SettingsError::new(
            SettingsField::Description,
            format!("Terms description cannot be {error}"),
        ));
    }
    Ok(())
}

pub fn validate_definition_title(value: &str) -> Result<(), SettingsError> {
    if value.is_empty() || value.len() > 64 {
        let error = if value.is_empty() {
            "empty"
        } else {
            "longer than 64 characters"
        };
        return Err(SettingsError::new(
            SettingsField::Title,
            format!("Game title cannot be {error}"),
        ));
    }
    Ok(())
}

pub fn validate_definition_description(value: &str) -> Result<(), SettingsError> {
    if value.is_empty() || value.len() > 1000 {
        let error = if value.is_empty() {
            "empty"
        } else {
            "longer than 1000 characters"
        };
        return Err(SettingsError::new(
            SettingsField::Description,
            format!("Game description cannot be {error}"),
        ));
    }
    Ok(())
}

pub fn validate_options(options: &[GameOption]) -> Result<(), SettingsError> {
    if options.len() < 2 {
        return Err(SettingsError::new(
            SettingsField::Options,
            "There should be at least 2 options",
        ));
    }
    if options.len() > MAX_GAME_OPTIONS {
        return Err(SettingsError::new(
            SettingsField::Options,
            format!("The maximum allowed options are {MAX_GAME_OPTIONS}"),
        ));
    }
    for (k, option) in options.iter().enumerate() {
        if option.title.is_empty() {
            return Err(SettingsError::new(
                SettingsField::Options,
                format!("The title of the {} option cannot be empty", ordinal(k + 1)),
            ));
        }
    }
    Ok(())
}

/// Stake buttons must respect the minimum stake and land exactly on the
/// stake step grid. Integer lamport arithmetic keeps the divisibility check
/// free of rounding drift.
pub fn validate_stake_buttons(
    buttons: &[Lamports],
    min_stake: Lamports,
    min_step: Lamports,
) -> Result<(), SettingsError> {
    if buttons.len() > MAX_STAKE_BUTTONS {
        return Err(SettingsError::new(
            SettingsField::StakeButtons,
            format!("Too many stake buttons! Cannot create more than {MAX_STAKE_BUTTONS}"),
        ));
    }
    for (k, stake) in buttons.iter().enumerate() {
        if *stake < min_stake {
            return Err(SettingsError::new(
                SettingsField::StakeButtons,
                format!(
                    "The amount of the {} stake button cannot be smaller than the minimum allowed stake",
                    ordinal(k + 1)
                ),
            ));
        }
        // A zero step divides nothing.
        let on_grid = min_step.as_u64() != 0 && stake.as_u64() % min_step.as_u64() == 0;
        if !on_grid {
            return Err(SettingsError::new(
                SettingsField::StakeButtons,
                format!(
                    "The amount of the {} stake button should be divisible by the min-step amount",
                    ordinal(k + 1)
                ),
            ));
        }
    }
    Ok(())
}

pub fn validate_profit_sharing(
    system_config: &SystemConfig,
    fee: f64,
    profit_sharing: &[ProfitShare],
) -> Result<(), SettingsError> {
    if profit_sharing.is_empty() {
        return Err(SettingsError::new(
            SettingsField::ProfitSharing,
            "Profit sharing cannot be empty!",
        ));
    }
    if profit_sharing.len() > MAX_PROFIT_SHARES {
        return Err(SettingsError::new(
            SettingsField::ProfitSharing,
            format!("Profit sharing is limited to a maximum of {MAX_PROFIT_SHARES} Public keys"),
        ));
    }

    let mut keys: Vec<&str> = Vec::with_capacity(profit_sharing.len());
    // Shares are compared in rounded hundredths of a percent so float
    // accumulation cannot fail an exact-looking 100% total.
    let mut total_hundredths: i64 = 0;
    for item in profit_sharing {
        if keys.contains(&item.treasury.as_str()) {
            return Err(SettingsError::new(
                SettingsField::ProfitSharing,
                "Treasury public keys are duplicated",
            ));
        }
        if item.treasury.is_empty() {
            return Err(SettingsError::new(
                SettingsField::ProfitSharing,
                "Treasury Public keys cannot be empty!",
            ));
        }
        if item.treasury.len() < 43 || item.treasury.len() > 44 {
            return Err(SettingsError::new(
                SettingsField::ProfitSharing,
                "Treasury Public keys must have between 43 and 44 characters",
            ));
        }
        if !is_base58(&item.treasury) {
            return Err(SettingsError::new(
                SettingsField::ProfitSharing,
                "Treasury Public keys cannot contain non-alphanumeric characters or the characters: 'I', 'O', 'l', '0'",
            ));
        }
        total_hundredths += (item.share * 100.0).round() as i64;
        keys.push(item.treasury.as_str());
    }
    if total_hundredths != 10_000 {
        return Err(SettingsError::new(
            SettingsField::ProfitSharing,
            format!(
                "The sum of all shares must be exactly 100%, but currently is {}%",
                total_hundredths as f64 / 100.0
            ),
        ));
    }

    // Treasury fee checks apply only when both the game fee and the program
    // profit fee are set.
    if fee == 0.0 || system_config.profit_fee == 0.0 {
        return Ok(());
    }
    let profit_fee = system_config.profit_fee;
    if fee < profit_fee {
        return Err(SettingsError::new(
            SettingsField::ProfitSharing,
            format!("Game fee ({fee}%) cannot be smaller than the Program fee ({profit_fee}%)"),
        ));
    }

    let system_treasury = system_config.treasury.to_string();
    let required_share = profit_fee / fee * 100.0;
    if !profit_sharing
        .iter()
        .any(|item| item.treasury == system_treasury)
    {
        return Err(SettingsError::new(
            SettingsField::ProfitSharing,
            format!(
                "Program treasury \"{system_treasury} -> {}%\" must be within the list of profit shares",
                (required_share * 100.0).ceil() / 100.0
            ),
        ));
    }
    for item in profit_sharing {
        if item.treasury == system_treasury && item.share * fee / 100.0 < profit_fee {
            return Err(SettingsError::new(
                SettingsField::ProfitSharing,
                format!(
                    "The program share for {} must be at least {:.2}%",
                    short_key(&system_treasury),
                    required_share
                ),
            ));
        }
    }
    Ok(())
}

/// Union of the config-level and game-level settings forms
#[derive(Debug, Clone, Copy)]
pub enum SettingsView<'a> {
    Config(&'a ConfigSettings),
    Game(&'a GameSettings),
}

impl<'a> SettingsView<'a> {
    fn fee(&self) -> f64 {
        match self {
            SettingsView::Config(c) => c.fee,
            SettingsView::Game(g) => g.fee,
        }
    }

    fn profit_sharing(&self) -> &'a [ProfitShare] {
        match self {
            SettingsView::Config(c) => &c.profit_sharing,
            SettingsView::Game(g) => &g.profit_sharing,
        }
    }

    fn min_stake(&self) -> Lamports {
        match self {
            SettingsView::Config(c) => c.min_stake,
            SettingsView::Game(g) => g.min_stake,
        }
    }

    fn min_step(&self) -> Lamports {
        match self {
            SettingsView::Config(c) => c.min_step,
            SettingsView::Game(g) => g.min_step,
        }
    }

    fn stake_buttons(&self) -> &'a [Lamports] {
        match self {
            SettingsView::Config(c) => &c.stake_buttons,
            SettingsView::Game(g) => &g.stake_buttons,
        }
    }

    fn terms(&self) -> &'a [Terms] {
        match self {
            SettingsView::Config(c) => &c.terms,
            SettingsView::Game(_) => &[],
        }
    }

    fn game(&self) -> Option<&'a GameSettings> {
        match self {
            SettingsView::Config(_) => None,
            SettingsView::Game(g) => Some(g),
        }
    }
}

/// Everything the cross-field validators may need to see at once
#[derive(Debug, Clone, Copy)]
pub struct AllSettings<'a> {
    pub system_config: &'a SystemConfig,
    pub settings: SettingsView<'a>,
    pub terms: Option<&'a TermsDraft>,
    pub definition: Option<&'a DefinitionDraft>,
    pub config: Option<&'a ConfigSettings>,
}

pub fn validate_fee_and_profit_sharing(all: &AllSettings) -> Result<(), SettingsError> {
    validate_fee(all.settings.fee())?;
    validate_profit_sharing(
        all.system_config,
        all.settings.fee(),
        all.settings.profit_sharing(),
    )
}

/// On update the draft's ID must already exist in the settings' terms list;
/// on creation it must not.
pub fn validate_terms_draft_id(all: &AllSettings) -> Result<(), SettingsError> {
    let Some(draft) = all.terms else {
        return Ok(());
    };
    let exists = all.settings.terms().iter().any(|t| t.id == draft.id);
    if draft.bump.is_some() {
        if !exists {
            return Err(SettingsError::new(SettingsField::Id, "Terms ID not found!"));
        }
        return Ok(());
    }
    if exists {
        return Err(SettingsError::new(
            SettingsField::Id,
            "Duplicated Terms ID! Please use a different one",
        ));
    }
    Ok(())
}

/// minStake, minStep, and the stake buttons are interdependent, so they are
/// always revalidated together.
pub fn validate_stakes(all: &AllSettings) -> Result<(), SettingsError> {
    validate_min_stake(all.settings.min_stake())?;
    validate_min_step(all.settings.min_step())?;
    validate_stake_buttons(
        all.settings.stake_buttons(),
        all.settings.min_stake(),
        all.settings.min_step(),
    )
}

/// A game must reference a terms entry that exists on the config account.
pub fn validate_terms_reference(all: &AllSettings) -> Result<(), SettingsError> {
    let Some(game) = all.settings.game() else {
        return Ok(());
    };
    if game.terms_id.is_empty() {
        return Err(SettingsError::new(
            SettingsField::TermsId,
            "Cannot create a game without Terms & Conditions",
        ));
    }
    let known = all
        .config
        .map(|c| c.terms.iter().any(|t| t.id == game.terms_id))
        .unwrap_or(false);
    if !known {
        return Err(SettingsError::new(
            SettingsField::TermsId,
            "Invalid Terms & Conditions",
        ));
    }
    Ok(())
}

/// Strict ordering open < close < settle; violations are reported against
/// the later field.
pub fn validate_dates(all: &AllSettings) -> Result<(), SettingsError> {
    let Some(game) = all.settings.game() else {
        return Ok(());
    };
    if game.open_time >= game.close_time {
        return Err(SettingsError::new(
            SettingsField::CloseTime,
            "Close time must be greater than open time",
        ));
    }
    if game.close_time >= game.settle_time {
        return Err(SettingsError::new(
            SettingsField::SettleTime,
            "Settle time must be greater than close time",
        ));
    }
    Ok(())
}

/// Single-field input, tagged by field and form
///
/// Replaces name-keyed validator lookup with a closed enum the compiler
/// checks: every input names its validator in `validate`.
#[derive(Debug, Clone, Copy)]
pub enum SettingsInput<'a> {
    Fee(f64),
    FireThreshold(Lamports),
    MinStake(Lamports),
    MinStep(Lamports),
    Domain(&'a str),
    TermsId(&'a str),
    TermsTitle(&'a str),
    TermsDescription(&'a str),
    DefinitionTitle(&'a str),
    DefinitionDescription(&'a str),
    Options(&'a [GameOption]),
}

impl SettingsInput<'_> {
    /// Field this input reports against.
    pub fn field(&self) -> SettingsField {
        match self {
            SettingsInput::Fee(_) => SettingsField::Fee,
            SettingsInput::FireThreshold(_) => SettingsField::FireThreshold,
            SettingsInput::MinStake(_) => SettingsField::MinStake,
            SettingsInput::MinStep(_) => SettingsField::MinStep,
            SettingsInput::Domain(_) => SettingsField::Domain,
            SettingsInput::TermsId(_) => SettingsField::Id,
            SettingsInput::TermsTitle(_) | SettingsInput::DefinitionTitle(_) => {
                SettingsField::Title
            }
            SettingsInput::TermsDescription(_) | SettingsInput::DefinitionDescription(_) => {
                SettingsField::Description
            }
            SettingsInput::Options(_) => SettingsField::Options,
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        match self {
            SettingsInput::Fee(v) => validate_fee(*v),
            SettingsInput::FireThreshold(v) => validate_fire_threshold(*v),
            SettingsInput::MinStake(v) => validate_min_stake(*v),
            SettingsInput::MinStep(v) => validate_min_step(*v),
            SettingsInput::Domain(v) => validate_domain(v),
            SettingsInput::TermsId(v) => validate_terms_id(v),
            SettingsInput::TermsTitle(v) => validate_terms_title(v),
            SettingsInput::TermsDescription(v) => validate_terms_description(v),
            SettingsInput::DefinitionTitle(v) => validate_definition_title(v),
            SettingsInput::DefinitionDescription(v) => validate_definition_description(v),
            SettingsInput::Options(v) => validate_options(v),
        }
    }
}

/// Cross-field validator triggered when `field` changes.
pub fn validate_combined(field: SettingsField, all: &AllSettings) -> Result<(), SettingsError> {
    match field {
        SettingsField::Fee | SettingsField::ProfitSharing => validate_fee_and_profit_sharing(all),
        SettingsField::Id => validate_terms_draft_id(all),
        SettingsField::MinStake | SettingsField::MinStep | SettingsField::StakeButtons => {
            validate_stakes(all)
        }
        SettingsField::TermsId => validate_terms_reference(all),
        SettingsField::OpenTime | SettingsField::CloseTime | SettingsField::SettleTime => {
            validate_dates(all)
        }
        _ => Ok(()),
    }
}

/// Other fields whose displayed errors must be cleared when `field` changes.
///
/// A field validated jointly with another leaves its partner's stale error
/// on screen otherwise.
pub fn related_fields(field: SettingsField) -> &'static [SettingsField] {
    use SettingsField::*;
    match field {
        Fee => &[ProfitSharing],
        ProfitSharing => &[Fee],
        OpenTime => &[CloseTime, SettleTime],
        CloseTime => &[OpenTime, SettleTime],
        SettleTime => &[OpenTime, CloseTime],
        _ => &[],
    }
}
