//! Built-in scenarios for the measurement form and avatar generator.

use crate::scenario::{Expectation, Scenario, Target};
use crate::Locator;

pub const MEASUREMENTS_PATH: &str = "/measurements";
pub const AVATAR_PATH: &str = "/avatar";

pub const SAVED_MESSAGE: &str = "Measurements saved";
pub const HEIGHT_ERROR_MESSAGE: &str = "Height must be positive";

/// Every built-in scenario, in run order
pub fn builtin() -> Vec<Scenario> {
    vec![
        save_valid_measurements(),
        reject_height(
            "measurements-reject-negative-height",
            "A negative height is rejected with a validation error",
            "-10",
        ),
        reject_height(
            "measurements-reject-zero-height",
            "A zero height is rejected with a validation error",
            "0",
        ),
        reject_non_numeric_height(),
        generate_avatar(),
    ]
}

fn save_button() -> Target {
    Target::immediate(Locator::button_text("Save"))
}

fn save_valid_measurements() -> Scenario {
    Scenario::new(
        "measurements-save-valid",
        "Saving a valid height and weight shows the success banner",
    )
    .navigate(MEASUREMENTS_PATH)
    .fill(Target::present(Locator::name("height")), "170")
    .fill(Target::immediate(Locator::name("weight")), "65")
    .click(save_button())
    .expect(
        Target::present(Locator::class_name("alert-success")),
        Expectation::TextContains {
            text: SAVED_MESSAGE.to_string(),
        },
    )
}

fn reject_height(name: &str, description: &str, height: &str) -> Scenario {
    Scenario::new(name, description)
        .navigate(MEASUREMENTS_PATH)
        .fill(Target::present(Locator::name("height")), height)
        .click(save_button())
        .expect(
            Target::present(Locator::class_name("error")),
            Expectation::TextContains {
                text: HEIGHT_ERROR_MESSAGE.to_string(),
            },
        )
}

/// The height input is `type="number"`, so the browser drops non-numeric
/// keystrokes and the form never sees them
fn reject_non_numeric_height() -> Scenario {
    Scenario::new(
        "measurements-reject-non-numeric-height",
        "A non-numeric height is refused by the number input",
    )
    .navigate(MEASUREMENTS_PATH)
    .fill(Target::present(Locator::name("height")), "abc")
    .expect(
        Target::immediate(Locator::name("height")),
        Expectation::ValueEquals {
            value: String::new(),
        },
    )
}

fn generate_avatar() -> Scenario {
    Scenario::new(
        "avatar-generate",
        "Generating an avatar renders an inline image",
    )
    .navigate(AVATAR_PATH)
    .click(Target::clickable(Locator::button_text("Generate Avatar")))
    .expect(
        Target::present(Locator::tag_name("img")),
        Expectation::ImageDataUri {
            attribute: "src".to_string(),
        },
    )
}
