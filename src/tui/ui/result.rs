//! Result view: submission progress and the returned risk score.

use chrono::{DateTime, Local};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::domain::Prediction;
use crate::tui::anim::CountUp;
use crate::tui::styles::ClinicTheme;

/// Captions rotated through while a submission is in flight.
const PROGRESS_CAPTIONS: [&str; 5] = [
    "Analizando datos del paciente...",
    "Procesando información clínica...",
    "Evaluando factores de riesgo...",
    "Calculando probabilidad...",
    "Generando recomendaciones...",
];

/// Result screen state.
#[derive(Debug, Clone)]
pub enum ResultState {
    /// Nothing submitted yet
    Idle,
    /// Request in flight; progress is cosmetic
    Submitting { progress: f64 },
    /// Prediction received
    Complete {
        prediction: Prediction,
        count_up: CountUp,
        evaluated_at: DateTime<Local>,
    },
    /// Attempt failed with a single message
    Error { message: String },
}

impl Default for ResultState {
    fn default() -> Self {
        Self::Idle
    }
}

impl ResultState {
    /// Build the completed state with a fresh count-up animation.
    #[must_use]
    pub fn complete(prediction: Prediction) -> Self {
        let count_up = CountUp::new(
            prediction.risk_percentage,
            std::time::Duration::from_millis(1500),
        );
        Self::Complete {
            prediction,
            count_up,
            evaluated_at: Local::now(),
        }
    }
}

/// Render the result screen.
pub fn render_result(f: &mut Frame, area: Rect, state: &ResultState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_result_header(f, chunks[0]);
    match state {
        ResultState::Idle => render_idle(f, chunks[1]),
        ResultState::Submitting { progress } => render_submitting(f, chunks[1], *progress),
        ResultState::Complete {
            prediction,
            count_up,
            evaluated_at,
        } => render_prediction(f, chunks[1], prediction, count_up, evaluated_at),
        ResultState::Error { message } => render_error(f, chunks[1], message),
    }
    render_result_footer(f, chunks[2], state);
}

fn render_result_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", ClinicTheme::text()),
        Span::styled("Resultado de la Evaluación", ClinicTheme::title()),
        Span::styled(" │ Riesgo de cáncer de hígado", ClinicTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(ClinicTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_idle(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Sin evaluación todavía",
            ClinicTheme::text_secondary(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Complete el formulario del paciente para comenzar",
            ClinicTheme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(ClinicTheme::border()),
    );

    f.render_widget(content, area);
}

/// Pick the caption for the current (cosmetic) progress value.
fn caption_for(progress: f64) -> &'static str {
    let idx = ((progress * PROGRESS_CAPTIONS.len() as f64) as usize)
        .min(PROGRESS_CAPTIONS.len() - 1);
    PROGRESS_CAPTIONS[idx]
}

fn render_submitting(f: &mut Frame, area: Rect, progress: f64) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .margin(2)
        .split(area);

    let stage = Paragraph::new(Line::from(vec![
        Span::styled("Enviando: ", ClinicTheme::text_secondary()),
        Span::styled("Predicción en curso", ClinicTheme::focused()),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(stage, chunks[0]);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(ClinicTheme::border()),
        )
        .gauge_style(ClinicTheme::subtitle())
        .percent((progress * 100.0) as u16)
        .label(format!("{:.0}%", progress * 100.0));
    f.render_widget(gauge, chunks[1]);

    let caption = Paragraph::new(Line::from(Span::styled(
        caption_for(progress),
        ClinicTheme::text_muted(),
    )))
    .alignment(Alignment::Center);
    f.render_widget(caption, chunks[2]);
}

fn render_prediction(
    f: &mut Frame,
    area: Rect,
    prediction: &Prediction,
    count_up: &CountUp,
    evaluated_at: &DateTime<Local>,
) {
    let block = Block::default()
        .title(Span::styled(" Evaluación de Riesgo ", ClinicTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(ClinicTheme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Risk label + animated percentage
            Constraint::Length(4), // Gauge
            Constraint::Length(3), // Recommendation
            Constraint::Length(4), // Details
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    let risk_class = prediction.risk_class();
    let risk_style = ClinicTheme::risk(risk_class);
    let displayed = count_up.current();

    let risk_display = Paragraph::new(vec![
        Line::from(Span::styled(
            risk_class.label(),
            risk_style.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{displayed:.1}%"),
            risk_style.add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(risk_display, chunks[0]);

    // The gauge tracks the animated value, not the final one, so it grows
    // with the count-up.
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(" Riesgo estimado ", ClinicTheme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(ClinicTheme::border()),
        )
        .gauge_style(risk_style)
        .percent(displayed.clamp(0.0, 100.0) as u16)
        .label(format!("{displayed:.1}%"));
    f.render_widget(gauge, chunks[1]);

    let recommendation = Paragraph::new(Line::from(vec![
        Span::styled(
            match risk_class {
                crate::domain::RiskClass::High => "⚠ ",
                crate::domain::RiskClass::Low => "✓ ",
            },
            risk_style,
        ),
        Span::styled(prediction.risk_message.clone(), ClinicTheme::text()),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(recommendation, chunks[2]);

    let details = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Probabilidad: ", ClinicTheme::text_secondary()),
            Span::styled(
                format!("{:.4}", prediction.risk_probability),
                ClinicTheme::text(),
            ),
            Span::styled("   Acción requerida: ", ClinicTheme::text_secondary()),
            Span::styled(prediction.action_required.label(), risk_style),
        ]),
        Line::from(vec![
            Span::styled("Fecha de evaluación: ", ClinicTheme::text_secondary()),
            Span::styled(
                evaluated_at.format("%d/%m/%Y %H:%M").to_string(),
                ClinicTheme::text(),
            ),
        ]),
    ])
    .alignment(Alignment::Center);
    f.render_widget(details, chunks[3]);
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("! Error", ClinicTheme::danger())),
        Line::from(""),
        Line::from(Span::styled(message, ClinicTheme::text())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(ClinicTheme::danger()),
    );

    f.render_widget(content, area);
}

fn render_result_footer(f: &mut Frame, area: Rect, state: &ResultState) {
    let content = match state {
        ResultState::Complete { .. } => Line::from(vec![
            Span::styled("[Enter/Esc] ", ClinicTheme::key_hint()),
            Span::styled("Volver ", ClinicTheme::key_desc()),
            Span::styled("[N] ", ClinicTheme::key_hint()),
            Span::styled("Nueva evaluación", ClinicTheme::key_desc()),
        ]),
        ResultState::Error { .. } => Line::from(vec![
            Span::styled("[Enter] ", ClinicTheme::key_hint()),
            Span::styled("Volver al formulario ", ClinicTheme::key_desc()),
            Span::styled("[Esc] ", ClinicTheme::key_hint()),
            Span::styled("Salir", ClinicTheme::key_desc()),
        ]),
        _ => Line::from(vec![Span::styled(
            "Procesando...",
            ClinicTheme::text_muted(),
        )]),
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(ClinicTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ActionRequired;

    #[test]
    fn test_caption_follows_progress() {
        assert_eq!(caption_for(0.0), PROGRESS_CAPTIONS[0]);
        assert_eq!(caption_for(0.99), PROGRESS_CAPTIONS[4]);
        // Never indexes out of bounds.
        assert_eq!(caption_for(1.0), PROGRESS_CAPTIONS[4]);
    }

    #[test]
    fn test_complete_state_counts_up_to_the_prediction() {
        let prediction = Prediction {
            risk_percentage: 72.3,
            risk_probability: 0.723,
            risk_message: "See specialist".to_string(),
            action_required: ActionRequired::Immediate,
            risk_level: None,
        };
        let state = ResultState::complete(prediction);
        match state {
            ResultState::Complete { count_up, .. } => {
                assert!((count_up.target() - 72.3).abs() < f64::EPSILON);
            }
            _ => panic!("Expected complete state"),
        }
    }
}
