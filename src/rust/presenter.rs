//! Text rendering of the form and of prediction results.

use std::fmt::Write;

use crate::form::{InputForm, SliderControl};
use crate::predictor::Prediction;

pub const PAGE_TITLE: &str = "Ứng dụng Dự đoán Mức độ Stress";
pub const INTRO: &str = "Sử dụng các thanh trượt bên dưới để nhập vào các chỉ số của bạn và nhấn 'Dự đoán' để xem kết quả.";
pub const TRIGGER_CAPTION: &str = "Dự đoán Mức độ Stress";
const COLUMN_HEADERS: [&str; 2] = ["Các chỉ số (Phần 1)", "Các chỉ số (Phần 2)"];
const CONFIDENCE_CAPTION: &str = "Độ chắc chắn của mô hình";
const EXPLANATION_CAPTION: &str = "Lời giải thích & Khuyến nghị:";

/// The three pieces of display content produced by a prediction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionReport {
    pub label: String,
    pub confidence: String,
    pub explanation: String,
}

impl PredictionReport {
    pub fn from_prediction(prediction: &Prediction) -> Self {
        let class = prediction.class_label();
        Self {
            label: class.label().to_string(),
            confidence: format_confidence(prediction.confidence),
            explanation: class.explanation().to_string(),
        }
    }

    pub fn render(&self) -> String {
        format!(
            "Kết quả Dự đoán: Mức độ Stress là '{}'\n{}: {}\n\n{}\n{}\n",
            self.label, CONFIDENCE_CAPTION, self.confidence, EXPLANATION_CAPTION, self.explanation
        )
    }
}

/// Formats a probability as a percentage with two decimals, always within
/// `0.00%..=100.00%`.
pub fn format_confidence(probability: f32) -> String {
    let probability = if probability.is_finite() {
        probability.clamp(0.0, 1.0)
    } else {
        0.0
    };
    format!("{:.2}%", f64::from(probability) * 100.0)
}

fn render_control(out: &mut String, position: usize, control: &SliderControl) {
    let _ = writeln!(
        out,
        "  [{}] {}: {} ({}–{})",
        position, control.label, control.value(), control.min, control.max
    );
}

/// Renders both columns of controls with their 1-based positions.
pub fn render_form(form: &InputForm) -> String {
    let (left, right) = form.columns();
    let mut out = String::new();
    let mut position = 1;
    for (header, column) in COLUMN_HEADERS.iter().zip([left, right]) {
        let _ = writeln!(out, "{}", header);
        for control in column {
            render_control(&mut out, position, control);
            position += 1;
        }
    }
    out
}

pub fn render_header() -> String {
    format!("{}\n{}\n", PAGE_TITLE, INTRO)
}
