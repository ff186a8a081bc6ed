//! Static advisory lookup, keyed by predicted class name.
//!
//! These recommendations are NOT real medical advice. They are part of a
//! university capstone project and should only be used for academic purposes.
//! Always consult a qualified health professional for real medical guidance.

use serde::Serialize;

/// Fixed disclaimer attached to every advisory record.
pub const DISCLAIMER: &str = "This is not real medical advice.";

const INFO_LINK: &str = " For more information please visit: \
https://www.health.vic.gov.au/preventive-health/healthy-eating-programs-and-services";

/// Advisory record for one predicted class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    pub food_drink: String,
    pub exercise: String,
    pub other: String,
    pub note: String,
}

impl Advisory {
    fn new(food_drink: &str, exercise: &str, other: &str) -> Self {
        Self {
            food_drink: food_drink.to_string(),
            exercise: exercise.to_string(),
            other: format!("{other}{INFO_LINK}"),
            note: DISCLAIMER.to_string(),
        }
    }
}

/// Look up the advisory record for a predicted label.
///
/// Pure table lookup. Labels without an entry (including the unknown label)
/// get a fixed "no recommendations" record rather than failing.
pub fn recommend(label: &str) -> Advisory {
    match label {
        "Insufficient Weight" => Advisory::new(
            "Increase caloric intake with balanced, nutrient-rich meals. Incorporate healthy \
             fats such as avocados, nuts, and olive oils.",
            "Include strength training to build muscle mass.",
            "Consult a GP or medical professional if underweight persists.",
        ),
        "Normal Weight" => Advisory::new(
            "Maintain a balanced diet (lean meats, fruits, vegetables).",
            "Continue low intensity exercise (e.g., brisk walk 30 mins daily) or high intensity \
             exercise 2–3 times a week.",
            "Maintain regular health check-ups with a GP.",
        ),
        "Overweight Level_I" => Advisory::new(
            "Reduce sugary drinks and processed foods. Eat smaller portions and prioritise \
             low-calorie foods such as fresh fruit and vegetables.",
            "Do moderate exercise daily for 30–60 minutes.",
            "Track meals and log food.",
        ),
        "Overweight Level_II" => Advisory::new(
            "Reduce sugary drinks and processed foods. Eat smaller portions and prioritise \
             low-calorie and high-fibre foods such as fresh fruit and vegetables. Limit fast \
             food and fried foods.",
            "Include structured exercise such as cardio plus resistance/weight training.",
            "Consider counselling from a medical professional such as a nutritionist.",
        ),
        "Obesity Type_I" => Advisory::new(
            "Reduce sugary drinks and processed foods. Eat smaller portions, prioritise lean \
             meats, and low-calorie, high-fibre foods such as fresh fruit and vegetables. Limit \
             fast food and fried foods.",
            "Limit sedentary time and increase overall activity levels with daily brisk walks \
             as well as structured exercise.",
            "Consider counselling from a medical professional (e.g., nutritionist). Consider \
             group support such as fitness groups or diet programs.",
        ),
        "Obesity Type_II" => Advisory::new(
            "Develop a personalised meal and diet plan with a professional.",
            "Gradually increase physical activity – likely regular and low-impact exercise \
             supervised and recommended by a specialist.",
            "Monitor blood pressure and glucose levels. Strongly recommended to consult a \
             medical specialist.",
        ),
        "Obesity Type_III" => Advisory::new(
            "Consult a medical professional to develop a medically approved diet plan – avoid \
             crash diets.",
            "Consult a specialist to develop a personalised plan tailored to your physical and \
             physiological abilities.",
            "Urgent medical/nutritional supervision is required.",
        ),
        other => {
            tracing::warn!(label = other, "no recommendations for label");
            Advisory::new(
                "No specific recommendations available.",
                "No specific recommendations available.",
                "No specific recommendations available.",
            )
        }
    }
}
