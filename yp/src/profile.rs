//! User profile collection and serialization
//!
//! A [`UserProfile`] is built once from form values and rendered to the single
//! descriptive text block that is sent to the model as the user message.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const AGE_RANGE: RangeInclusive<u32> = 5..=100;
pub const HEIGHT_CM_RANGE: RangeInclusive<u32> = 100..=250;
pub const WEIGHT_KG_RANGE: RangeInclusive<u32> = 30..=200;

/// Rendered for an empty goal selection
pub const NO_GOALS: &str = "Not specified";

/// Rendered for blank injury text
pub const NO_INJURIES: &str = "None";

/// Errors raised while building a profile
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("Invalid profile file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Declares a closed set of form choices whose wire value is the display label.
macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every choice, in form order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Label shown in the form and written into the profile text
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

labeled_enum! {
    Sex {
        Female => "Female",
        Male => "Male",
        Other => "Other",
    }
}

labeled_enum! {
    /// Primary yoga goal (multi-select)
    Goal {
        Flexibility => "Flexibility",
        Strength => "Strength",
        Relaxation => "Relaxation / Stress relief",
        WeightLoss => "Weight loss",
        BalancePosture => "Balance and posture improvement",
        WellBeing => "General well-being",
    }
}

labeled_enum! {
    Experience {
        CompleteBeginner => "Complete Beginner",
        Beginner => "Beginner",
        Intermediate => "Intermediate",
        Advanced => "Advanced",
    }
}

labeled_enum! {
    /// Preferred session length; drives the requested pose count
    SessionDuration {
        Short => "10–15 minutes",
        Medium => "20–30 minutes",
        Long => "30–45 minutes",
        Extended => "1 hour or more",
    }
}

labeled_enum! {
    TimeOfDay {
        Morning => "Morning",
        Afternoon => "Afternoon",
        Evening => "Evening",
        Flexible => "Flexible / No preference",
    }
}

labeled_enum! {
    Pace {
        Slow => "Slow and calming (Yin, Restorative)",
        Moderate => "Moderate and flowing (Hatha, Vinyasa)",
        Fast => "Fast and energizing (Power Yoga)",
        NotSure => "Not sure",
    }
}

/// Immutable physical profile and practice preferences for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct UserProfile {
    age: u32,
    sex: Sex,
    height_cm: u32,
    weight_kg: u32,
    injuries: String,
    goals: Vec<Goal>,
    experience: Experience,
    duration: SessionDuration,
    time_of_day: TimeOfDay,
    pace: Pace,
}

impl UserProfile {
    /// Start from the form defaults
    pub fn builder() -> ProfileBuilder {
        ProfileBuilder::default()
    }

    /// Parse and validate a YAML profile file
    pub fn from_yaml(content: &str) -> Result<Self, ProfileError> {
        debug!(len = content.len(), "UserProfile::from_yaml: called");
        let builder: ProfileBuilder = serde_yaml::from_str(content)?;
        builder.build()
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn height_cm(&self) -> u32 {
        self.height_cm
    }

    pub fn weight_kg(&self) -> u32 {
        self.weight_kg
    }

    /// Injury text as entered; may be blank
    pub fn injuries(&self) -> &str {
        &self.injuries
    }

    /// Goals in selection order
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn experience(&self) -> Experience {
        self.experience
    }

    pub fn duration(&self) -> SessionDuration {
        self.duration
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        self.time_of_day
    }

    pub fn pace(&self) -> Pace {
        self.pace
    }

    /// Serialize to the profile text handed verbatim to the model
    pub fn to_prompt_text(&self) -> String {
        debug!("UserProfile::to_prompt_text: called");
        let goals = if self.goals.is_empty() {
            NO_GOALS.to_string()
        } else {
            self.goals.iter().map(Goal::label).collect::<Vec<_>>().join(", ")
        };

        let injuries = if self.injuries.trim().is_empty() {
            NO_INJURIES
        } else {
            self.injuries.as_str()
        };

        format!(
            "**Basic Info:**\n\
             - Age: {age}\n\
             - Height: {height} cm\n\
             - Weight: {weight} kg\n\
             \n\
             **Lifestyle & Yoga Goals:**\n\
             - Sex: {sex}\n\
             - Experience Level: {experience}\n\
             - Yoga Goals: {goals}\n\
             - Preferred Duration: {duration}\n\
             - Preferred Time of Day: {time_of_day}\n\
             - Preferred Pace: {pace}\n\
             \n\
             **Additional Details:**\n\
             - Physical Conditions or Injuries: {injuries}\n",
            age = self.age,
            height = self.height_cm,
            weight = self.weight_kg,
            sex = self.sex,
            experience = self.experience,
            duration = self.duration,
            time_of_day = self.time_of_day,
            pace = self.pace,
        )
    }
}

/// Collects typed form values; defaults mirror the form's initial state
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ProfileBuilder {
    age: u32,
    sex: Sex,
    height_cm: u32,
    weight_kg: u32,
    injuries: String,
    goals: Vec<Goal>,
    experience: Experience,
    duration: SessionDuration,
    time_of_day: TimeOfDay,
    pace: Pace,
}

impl Default for ProfileBuilder {
    fn default() -> Self {
        Self {
            age: 25,
            sex: Sex::Female,
            height_cm: 165,
            weight_kg: 60,
            injuries: String::new(),
            goals: Vec::new(),
            experience: Experience::CompleteBeginner,
            duration: SessionDuration::Short,
            time_of_day: TimeOfDay::Morning,
            pace: Pace::Slow,
        }
    }
}

impl ProfileBuilder {
    pub fn age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    pub fn sex(mut self, sex: Sex) -> Self {
        self.sex = sex;
        self
    }

    pub fn height_cm(mut self, height_cm: u32) -> Self {
        self.height_cm = height_cm;
        self
    }

    pub fn weight_kg(mut self, weight_kg: u32) -> Self {
        self.weight_kg = weight_kg;
        self
    }

    pub fn injuries(mut self, injuries: impl Into<String>) -> Self {
        self.injuries = injuries.into();
        self
    }

    /// Add a goal; repeated selections are ignored
    pub fn goal(mut self, goal: Goal) -> Self {
        if !self.goals.contains(&goal) {
            self.goals.push(goal);
        }
        self
    }

    pub fn goals(self, goals: impl IntoIterator<Item = Goal>) -> Self {
        goals.into_iter().fold(self, |builder, goal| builder.goal(goal))
    }

    pub fn experience(mut self, experience: Experience) -> Self {
        self.experience = experience;
        self
    }

    pub fn duration(mut self, duration: SessionDuration) -> Self {
        self.duration = duration;
        self
    }

    pub fn time_of_day(mut self, time_of_day: TimeOfDay) -> Self {
        self.time_of_day = time_of_day;
        self
    }

    pub fn pace(mut self, pace: Pace) -> Self {
        self.pace = pace;
        self
    }

    /// Check the numeric widget ranges and freeze the profile
    pub fn build(self) -> Result<UserProfile, ProfileError> {
        debug!(age = self.age, height_cm = self.height_cm, weight_kg = self.weight_kg, "ProfileBuilder::build: called");
        check_range("age", self.age, &AGE_RANGE)?;
        check_range("height", self.height_cm, &HEIGHT_CM_RANGE)?;
        check_range("weight", self.weight_kg, &WEIGHT_KG_RANGE)?;

        // YAML input may list a goal twice
        let mut goals = Vec::with_capacity(self.goals.len());
        for goal in self.goals {
            if !goals.contains(&goal) {
                goals.push(goal);
            }
        }

        Ok(UserProfile {
            age: self.age,
            sex: self.sex,
            height_cm: self.height_cm,
            weight_kg: self.weight_kg,
            injuries: self.injuries,
            goals,
            experience: self.experience,
            duration: self.duration,
            time_of_day: self.time_of_day,
            pace: self.pace,
        })
    }
}

fn check_range(field: &'static str, value: u32, range: &RangeInclusive<u32>) -> Result<(), ProfileError> {
    if range.contains(&value) {
        Ok(())
    } else {
        debug!(field, value, "check_range: out of range");
        Err(ProfileError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> UserProfile {
        UserProfile::builder()
            .age(42)
            .sex(Sex::Male)
            .height_cm(180)
            .weight_kg(82)
            .injuries("Lower back pain")
            .goals([Goal::Flexibility, Goal::Relaxation])
            .experience(Experience::Intermediate)
            .duration(SessionDuration::Long)
            .time_of_day(TimeOfDay::Evening)
            .pace(Pace::Moderate)
            .build()
            .unwrap()
    }

    #[test]
    fn test_prompt_text_contains_every_field() {
        let text = sample_profile().to_prompt_text();

        assert!(text.contains("- Age: 42"));
        assert!(text.contains("- Height: 180 cm"));
        assert!(text.contains("- Weight: 82 kg"));
        assert!(text.contains("- Sex: Male"));
        assert!(text.contains("- Experience Level: Intermediate"));
        assert!(text.contains("- Yoga Goals: Flexibility, Relaxation / Stress relief"));
        assert!(text.contains("- Preferred Duration: 30–45 minutes"));
        assert!(text.contains("- Preferred Time of Day: Evening"));
        assert!(text.contains("- Preferred Pace: Moderate and flowing (Hatha, Vinyasa)"));
        assert!(text.contains("- Physical Conditions or Injuries: Lower back pain"));
    }

    #[test]
    fn test_prompt_text_sections_in_order() {
        let text = sample_profile().to_prompt_text();

        let basic = text.find("**Basic Info:**").unwrap();
        let lifestyle = text.find("**Lifestyle & Yoga Goals:**").unwrap();
        let details = text.find("**Additional Details:**").unwrap();
        assert!(basic < lifestyle && lifestyle < details);
    }

    #[test]
    fn test_empty_goals_and_blank_injuries() {
        let text = UserProfile::builder().injuries("   ").build().unwrap().to_prompt_text();

        assert!(text.contains("- Yoga Goals: Not specified"));
        assert!(text.contains("- Physical Conditions or Injuries: None"));
    }

    #[test]
    fn test_goals_keep_selection_order() {
        let profile = UserProfile::builder()
            .goal(Goal::WellBeing)
            .goal(Goal::Strength)
            .goal(Goal::WellBeing)
            .build()
            .unwrap();

        assert_eq!(profile.goals(), &[Goal::WellBeing, Goal::Strength]);
        assert!(profile.to_prompt_text().contains("- Yoga Goals: General well-being, Strength"));
    }

    #[test]
    fn test_same_input_same_text() {
        assert_eq!(sample_profile().to_prompt_text(), sample_profile().to_prompt_text());
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = UserProfile::builder().age(4).build().unwrap_err();
        assert!(matches!(err, ProfileError::OutOfRange { field: "age", value: 4, .. }));

        let err = UserProfile::builder().height_cm(251).build().unwrap_err();
        assert!(matches!(err, ProfileError::OutOfRange { field: "height", .. }));

        let err = UserProfile::builder().weight_kg(29).build().unwrap_err();
        assert!(matches!(err, ProfileError::OutOfRange { field: "weight", .. }));
    }

    #[test]
    fn test_range_bounds_inclusive() {
        assert!(UserProfile::builder().age(5).height_cm(100).weight_kg(30).build().is_ok());
        assert!(UserProfile::builder().age(100).height_cm(250).weight_kg(200).build().is_ok());
    }

    #[test]
    fn test_from_yaml_uses_labels_and_defaults() {
        let yaml = r#"
age: 31
sex: Other
goals:
  - Strength
  - Balance and posture improvement
duration: 1 hour or more
pace: Not sure
"#;

        let profile = UserProfile::from_yaml(yaml).unwrap();

        assert_eq!(profile.age(), 31);
        assert_eq!(profile.sex(), Sex::Other);
        assert_eq!(profile.goals(), &[Goal::Strength, Goal::BalancePosture]);
        assert_eq!(profile.duration(), SessionDuration::Extended);
        assert_eq!(profile.pace(), Pace::NotSure);
        // Defaults for unspecified
        assert_eq!(profile.height_cm(), 165);
        assert_eq!(profile.weight_kg(), 60);
        assert_eq!(profile.experience(), Experience::CompleteBeginner);
        assert_eq!(profile.time_of_day(), TimeOfDay::Morning);
    }

    #[test]
    fn test_from_yaml_rejects_unknown_label() {
        let err = UserProfile::from_yaml("experience: Guru\n").unwrap_err();
        assert!(matches!(err, ProfileError::Yaml(_)));
    }

    #[test]
    fn test_from_yaml_validates_ranges() {
        let err = UserProfile::from_yaml("weight-kg: 500\n").unwrap_err();
        assert!(matches!(err, ProfileError::OutOfRange { field: "weight", .. }));
    }

    #[test]
    fn test_labels_cover_form_choices() {
        assert_eq!(Goal::ALL.len(), 6);
        assert_eq!(Experience::ALL.len(), 4);
        assert_eq!(SessionDuration::ALL.len(), 4);
        assert_eq!(TimeOfDay::ALL.len(), 4);
        assert_eq!(Pace::ALL.len(), 4);
        assert_eq!(Sex::ALL.len(), 3);
        assert_eq!(SessionDuration::Short.to_string(), "10–15 minutes");
    }
}
