//! Patient data entry form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::PatientInput;
use crate::tui::styles::ClinicTheme;

/// What kind of control a form field is.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// Free-text numeric entry
    Numeric {
        value: String,
        hint: &'static str,
    },
    /// Single choice from a fixed option list; starts unselected
    Select {
        options: &'static [&'static str],
        selected: Option<usize>,
    },
    /// Binary yes/no flag
    Checkbox { checked: bool },
}

/// Form field definition.
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub kind: FieldKind,
}

/// Patient form state.
///
/// Field order matches the request body's declaration order: numeric
/// fields, then selects, then flags.
pub struct PatientFormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

const GENDER_OPTIONS: &[&str] = &["male", "female"];
const ALCOHOL_OPTIONS: &[&str] = &["none", "light", "moderate", "heavy"];
const SMOKING_OPTIONS: &[&str] = &["never", "former", "current"];
const ACTIVITY_OPTIONS: &[&str] = &["low", "moderate", "high"];

impl Default for PatientFormState {
    fn default() -> Self {
        Self {
            fields: vec![
                FormField {
                    label: "Age",
                    kind: FieldKind::Numeric {
                        value: String::new(),
                        hint: "years (0-120)",
                    },
                },
                FormField {
                    label: "BMI",
                    kind: FieldKind::Numeric {
                        value: String::new(),
                        hint: "kg/m2 (10-60)",
                    },
                },
                FormField {
                    label: "Liver function score",
                    kind: FieldKind::Numeric {
                        value: String::new(),
                        hint: "score (0-100)",
                    },
                },
                FormField {
                    label: "Alpha-fetoprotein level",
                    kind: FieldKind::Numeric {
                        value: String::new(),
                        hint: "ng/mL (0-1000)",
                    },
                },
                FormField {
                    label: "Gender",
                    kind: FieldKind::Select {
                        options: GENDER_OPTIONS,
                        selected: None,
                    },
                },
                FormField {
                    label: "Alcohol consumption",
                    kind: FieldKind::Select {
                        options: ALCOHOL_OPTIONS,
                        selected: None,
                    },
                },
                FormField {
                    label: "Smoking status",
                    kind: FieldKind::Select {
                        options: SMOKING_OPTIONS,
                        selected: None,
                    },
                },
                FormField {
                    label: "Physical activity level",
                    kind: FieldKind::Select {
                        options: ACTIVITY_OPTIONS,
                        selected: None,
                    },
                },
                FormField {
                    label: "Hepatitis B",
                    kind: FieldKind::Checkbox { checked: false },
                },
                FormField {
                    label: "Hepatitis C",
                    kind: FieldKind::Checkbox { checked: false },
                },
                FormField {
                    label: "Cirrhosis history",
                    kind: FieldKind::Checkbox { checked: false },
                },
                FormField {
                    label: "Family history of cancer",
                    kind: FieldKind::Checkbox { checked: false },
                },
                FormField {
                    label: "Diabetes",
                    kind: FieldKind::Checkbox { checked: false },
                },
            ],
            selected_field: 0,
            error_message: None,
        }
    }
}

impl PatientFormState {
    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current field (numeric entry only)
    pub fn input_char(&mut self, c: char) {
        if let FieldKind::Numeric { value, .. } = &mut self.fields[self.selected_field].kind {
            if c.is_ascii_digit() || c == '.' || c == '-' {
                value.push(c);
                self.error_message = None;
            }
        }
    }

    /// Delete the last character of the current numeric field
    pub fn delete_char(&mut self) {
        if let FieldKind::Numeric { value, .. } = &mut self.fields[self.selected_field].kind {
            value.pop();
        }
    }

    /// Clear the current field to its unset state
    pub fn clear_field(&mut self) {
        match &mut self.fields[self.selected_field].kind {
            FieldKind::Numeric { value, .. } => value.clear(),
            FieldKind::Select { selected, .. } => *selected = None,
            FieldKind::Checkbox { checked } => *checked = false,
        }
    }

    /// Activate the current field: cycle a select, toggle a checkbox.
    pub fn activate(&mut self) {
        match &mut self.fields[self.selected_field].kind {
            FieldKind::Select { options, selected } => {
                *selected = Some(selected.map_or(0, |i| (i + 1) % options.len()));
                self.error_message = None;
            }
            FieldKind::Checkbox { checked } => {
                *checked = !*checked;
            }
            FieldKind::Numeric { .. } => {}
        }
    }

    /// Cycle the current select field backwards.
    pub fn activate_back(&mut self) {
        if let FieldKind::Select { options, selected } = &mut self.fields[self.selected_field].kind
        {
            *selected = Some(match *selected {
                Some(0) | None => options.len() - 1,
                Some(i) => i - 1,
            });
            self.error_message = None;
        }
    }

    fn numeric_value(&self, idx: usize) -> f64 {
        match &self.fields[idx].kind {
            // A failed parse (including an empty field) yields NaN, never
            // an error; validation turns NaN into a message.
            FieldKind::Numeric { value, .. } => value.parse().unwrap_or(f64::NAN),
            _ => f64::NAN,
        }
    }

    fn select_value(&self, idx: usize) -> String {
        match &self.fields[idx].kind {
            FieldKind::Select { options, selected } => selected
                .and_then(|i| options.get(i))
                .map(|s| (*s).to_string())
                .unwrap_or_default(),
            _ => String::new(),
        }
    }

    fn flag_value(&self, idx: usize) -> u8 {
        match &self.fields[idx].kind {
            FieldKind::Checkbox { checked } => u8::from(*checked),
            _ => 0,
        }
    }

    /// Collect the current form state into a fresh request payload.
    ///
    /// Pure read of UI state: numeric parse failures become NaN,
    /// unselected options become empty strings, flags become 0/1.
    #[must_use]
    pub fn to_patient_input(&self) -> PatientInput {
        PatientInput {
            age: self.numeric_value(0),
            bmi: self.numeric_value(1),
            liver_function_score: self.numeric_value(2),
            alpha_fetoprotein_level: self.numeric_value(3),
            gender: self.select_value(4),
            alcohol_consumption: self.select_value(5),
            smoking_status: self.select_value(6),
            physical_activity_level: self.select_value(7),
            hepatitis_b: self.flag_value(8),
            hepatitis_c: self.flag_value(9),
            cirrhosis_history: self.flag_value(10),
            family_history_cancer: self.flag_value(11),
            diabetes: self.flag_value(12),
        }
    }

    /// Wipe all field buffers and reset the form.
    ///
    /// Called as soon as a submission starts so patient data does not
    /// linger in UI state.
    pub fn clear_sensitive(&mut self) {
        for field in self.fields.iter_mut() {
            match &mut field.kind {
                FieldKind::Numeric { value, .. } => value.zeroize(),
                FieldKind::Select { selected, .. } => *selected = None,
                FieldKind::Checkbox { checked } => *checked = false,
            }
        }
        self.error_message = None;
        self.selected_field = 0;
    }

    /// Load sample data (typical moderate-risk patient).
    pub fn load_sample_data(&mut self) {
        let numeric = ["45", "25", "60", "10"];
        let selects = [0usize, 0, 0, 1]; // male, none, never, moderate

        for (i, val) in numeric.iter().enumerate() {
            if let FieldKind::Numeric { value, .. } = &mut self.fields[i].kind {
                *value = (*val).to_string();
            }
        }
        for (i, opt) in selects.iter().enumerate() {
            if let FieldKind::Select { selected, .. } = &mut self.fields[4 + i].kind {
                *selected = Some(*opt);
            }
        }
        for field in &mut self.fields[8..] {
            if let FieldKind::Checkbox { checked } = &mut field.kind {
                *checked = false;
            }
        }
    }
}

/// Render the patient data entry form.
pub fn render_patient_form(
    f: &mut Frame,
    area: Rect,
    state: &PatientFormState,
    health_warning: Option<&str>,
) {
    let warning_height = if health_warning.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),              // Header
            Constraint::Length(warning_height), // Health warning
            Constraint::Min(0),                 // Form
            Constraint::Length(3),              // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0]);
    if let Some(warning) = health_warning {
        render_health_warning(f, chunks[1], warning);
    }
    render_form_fields(f, chunks[2], state);
    render_form_footer(f, chunks[3], state);
}

fn render_form_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", ClinicTheme::text()),
        Span::styled("Evaluación de Riesgo", ClinicTheme::title()),
        Span::styled(
            " │ Predicción de cáncer de hígado",
            ClinicTheme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(ClinicTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_health_warning(f: &mut Frame, area: Rect, warning: &str) {
    let banner = Paragraph::new(Line::from(vec![
        Span::styled("! ", ClinicTheme::warning()),
        Span::styled(warning, ClinicTheme::warning()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(ClinicTheme::warning()),
    );

    f.render_widget(banner, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = (state.fields.len() + 1) / 2;

    render_field_column(f, columns[0], &state.fields[..mid], 0, state.selected_field);
    render_field_column(
        f,
        columns[1],
        &state.fields[mid..],
        mid,
        state.selected_field,
    );
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    offset: usize,
    selected: usize,
) {
    let field_height = 3;
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(field_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let border_style = if is_selected {
            ClinicTheme::border_focused()
        } else {
            ClinicTheme::border()
        };
        let title_style = if is_selected {
            ClinicTheme::focused()
        } else {
            ClinicTheme::text_secondary()
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let value_display = match &field.kind {
            FieldKind::Numeric { value, hint } => {
                if value.is_empty() {
                    Span::styled(*hint, ClinicTheme::text_muted())
                } else {
                    Span::styled(value.clone(), ClinicTheme::text())
                }
            }
            FieldKind::Select { options, selected } => match selected {
                Some(i) => Span::styled(options[*i], ClinicTheme::text()),
                None => Span::styled("— seleccionar —", ClinicTheme::text_muted()),
            },
            FieldKind::Checkbox { checked } => {
                if *checked {
                    Span::styled("[x] sí", ClinicTheme::text())
                } else {
                    Span::styled("[ ] no", ClinicTheme::text_muted())
                }
            }
        };

        let cursor = if is_selected {
            Span::styled("▌", Style::default().fg(ClinicTheme::PRIMARY_LIGHT))
        } else {
            Span::raw("")
        };

        let content =
            Paragraph::new(Line::from(vec![Span::raw(" "), value_display, cursor])).block(block);

        f.render_widget(content, chunks[i]);
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", ClinicTheme::danger()),
            Span::styled(err.clone(), ClinicTheme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", ClinicTheme::key_hint()),
            Span::styled("Navigate ", ClinicTheme::key_desc()),
            Span::styled("[Space] ", ClinicTheme::key_hint()),
            Span::styled("Toggle/Cycle ", ClinicTheme::key_desc()),
            Span::styled("[Enter] ", ClinicTheme::key_hint()),
            Span::styled("Submit ", ClinicTheme::key_desc()),
            Span::styled("[S] ", ClinicTheme::key_hint()),
            Span::styled("Sample ", ClinicTheme::key_desc()),
            Span::styled("[Esc] ", ClinicTheme::key_hint()),
            Span::styled("Quit", ClinicTheme::key_desc()),
        ])
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

    #[test]
    fn test_default_form_has_13_fields_in_order() {
        let state = PatientFormState::default();
        assert_eq!(state.fields.len(), 13);
        assert!(matches!(state.fields[0].kind, FieldKind::Numeric { .. }));
        assert!(matches!(state.fields[4].kind, FieldKind::Select { .. }));
        assert!(matches!(state.fields[8].kind, FieldKind::Checkbox { .. }));
    }

    #[test]
    fn test_empty_numeric_collects_as_nan() {
        let state = PatientFormState::default();
        let input = state.to_patient_input();
        assert!(input.age.is_nan());
        assert!(input.bmi.is_nan());
        assert_eq!(input.gender, "");
        assert_eq!(input.hepatitis_b, 0);
    }

    #[test]
    fn test_garbage_numeric_collects_as_nan() {
        let mut state = PatientFormState::default();
        if let FieldKind::Numeric { value, .. } = &mut state.fields[0].kind {
            *value = "4.5.6".to_string();
        }
        assert!(state.to_patient_input().age.is_nan());
    }

    #[test]
    fn test_sample_data_collects_to_valid_input() {
        let mut state = PatientFormState::default();
        state.load_sample_data();
        let input = state.to_patient_input();
        assert!(input.validate().is_ok());
        assert!((input.age - 45.0).abs() < f64::EPSILON);
        assert_eq!(input.gender, "male");
        assert_eq!(input.physical_activity_level, "moderate");
    }

    #[test]
    fn test_select_cycles_and_checkbox_toggles() {
        let mut state = PatientFormState::default();
        state.selected_field = 4; // gender
        state.activate();
        assert_eq!(state.to_patient_input().gender, "male");
        state.activate();
        assert_eq!(state.to_patient_input().gender, "female");
        state.activate();
        assert_eq!(state.to_patient_input().gender, "male");
        state.activate_back();
        assert_eq!(state.to_patient_input().gender, "female");

        state.selected_field = 8; // hepatitis_b
        state.activate();
        assert_eq!(state.to_patient_input().hepatitis_b, 1);
        state.activate();
        assert_eq!(state.to_patient_input().hepatitis_b, 0);
    }

    #[test]
    fn test_numeric_input_filters_characters() {
        let mut state = PatientFormState::default();
        for c in "4a5x.0".chars() {
            state.input_char(c);
        }
        if let FieldKind::Numeric { value, .. } = &state.fields[0].kind {
            assert_eq!(value, "45.0");
        } else {
            panic!("Expected numeric field");
        }
    }

    #[test]
    fn test_clear_sensitive_resets_everything() {
        let mut state = PatientFormState::default();
        state.load_sample_data();
        state.selected_field = 7;
        state.error_message = Some("x".to_string());

        state.clear_sensitive();

        let input = state.to_patient_input();
        assert!(input.age.is_nan());
        assert_eq!(input.gender, "");
        assert_eq!(state.selected_field, 0);
        assert!(state.error_message.is_none());
    }

    #[test]
    fn test_field_navigation_wraps() {
        let mut state = PatientFormState::default();
        state.prev_field();
        assert_eq!(state.selected_field, 12);
        state.next_field();
        assert_eq!(state.selected_field, 0);
    }
}
