//! Exercise catalog - the guided exercises offered on the dashboard.

use once_cell::sync::Lazy;
use serde::Serialize;

/// Grouping shown as a tab in the exercise picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseCategory {
    Mental,
}

/// One guided exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub hover_color: &'static str,
}

/// The catalog, grouped by category.
#[derive(Debug, Clone, Serialize)]
pub struct ExerciseCatalog {
    pub mental: Vec<Exercise>,
}

impl ExerciseCatalog {
    pub fn in_category(&self, category: ExerciseCategory) -> &[Exercise] {
        match category {
            ExerciseCategory::Mental => &self.mental,
        }
    }

    pub fn find(&self, id: &str) -> Option<&Exercise> {
        self.mental.iter().find(|exercise| exercise.id == id)
    }
}

static CATALOG: Lazy<ExerciseCatalog> = Lazy::new(|| ExerciseCatalog {
    mental: vec![
        Exercise {
            id: "meditation",
            name: "Meditation",
            description: "Guided meditation for mindfulness and relaxation",
            icon: "🧘‍♀️",
            color: "from-violet-500 to-purple-500",
            hover_color: "from-violet-600 to-purple-600",
        },
        Exercise {
            id: "breathing",
            name: "Breathing Exercise",
            description: "Controlled breathing techniques for stress relief",
            icon: "🌬️",
            color: "from-blue-500 to-cyan-500",
            hover_color: "from-blue-600 to-cyan-600",
        },
    ],
});

/// Returns the built-in exercise catalog.
pub fn catalog() -> &'static ExerciseCatalog {
    &CATALOG
}
