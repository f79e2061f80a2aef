//! Interactive profile form
//!
//! Terminal widgets for the profile fields and the session credential.

use std::fmt::Display;
use std::ops::RangeInclusive;

use dialoguer::{Input, MultiSelect, Password, Select};
use eyre::{Context, Result};
use tracing::debug;

use crate::profile::{
    AGE_RANGE, Experience, Goal, HEIGHT_CM_RANGE, Pace, SessionDuration, Sex, TimeOfDay, UserProfile, WEIGHT_KG_RANGE,
};

/// Ask for every profile field, starting from the form defaults
pub fn prompt_profile() -> Result<UserProfile> {
    debug!("prompt_profile: called");
    let defaults = UserProfile::builder().build()?;

    println!("👤 User Profile");
    let age = number("Age", defaults.age(), AGE_RANGE)?;
    let sex = select("Sex", Sex::ALL)?;
    let height_cm = number("Height (cm)", defaults.height_cm(), HEIGHT_CM_RANGE)?;
    let weight_kg = number("Weight (kg)", defaults.weight_kg(), WEIGHT_KG_RANGE)?;
    let injuries: String = Input::new()
        .with_prompt("Physical conditions or injuries (optional, e.g. Back pain, Knee issues)")
        .allow_empty(true)
        .interact_text()
        .context("Failed to get user input")?;

    println!();
    println!("🧘‍♀️ Yoga Preferences");
    let goals = multi_select("Primary yoga goals (space to toggle)", Goal::ALL)?;
    let experience = select("Yoga experience level", Experience::ALL)?;
    let duration = select("Preferred session duration", SessionDuration::ALL)?;
    let time_of_day = select("Preferred time of day for practice", TimeOfDay::ALL)?;
    let pace = select("Preferred session pace", Pace::ALL)?;

    let profile = UserProfile::builder()
        .age(age)
        .sex(sex)
        .height_cm(height_cm)
        .weight_kg(weight_kg)
        .injuries(injuries)
        .goals(goals)
        .experience(experience)
        .duration(duration)
        .time_of_day(time_of_day)
        .pace(pace)
        .build()?;
    Ok(profile)
}

/// Ask for the OpenAI API key without echoing it
pub fn prompt_api_key() -> Result<String> {
    debug!("prompt_api_key: called");
    Password::new()
        .with_prompt("OpenAI API Key (https://platform.openai.com/account/api-keys)")
        .allow_empty_password(true)
        .interact()
        .context("Failed to read API key")
}

fn number(prompt: &str, default: u32, range: RangeInclusive<u32>) -> Result<u32> {
    let (min, max) = (*range.start(), *range.end());
    Input::new()
        .with_prompt(prompt)
        .default(default)
        .validate_with(move |value: &u32| -> Result<(), String> {
            if range.contains(value) {
                Ok(())
            } else {
                Err(format!("Enter a value between {min} and {max}"))
            }
        })
        .interact_text()
        .context("Failed to get user input")
}

fn select<T: Copy + Display>(prompt: &str, choices: &[T]) -> Result<T> {
    let index = Select::new()
        .with_prompt(prompt)
        .items(choices)
        .default(0)
        .interact()
        .context("Failed to get user input")?;
    Ok(choices[index])
}

fn multi_select<T: Copy + Display>(prompt: &str, choices: &[T]) -> Result<Vec<T>> {
    let indices = MultiSelect::new()
        .with_prompt(prompt)
        .items(choices)
        .interact()
        .context("Failed to get user input")?;
    Ok(indices.into_iter().map(|i| choices[i]).collect())
}
