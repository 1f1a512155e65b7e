use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid angle value '{value}' in junction {junction}.")]
    InvalidAngle { junction: usize, value: String },

    #[error("Junction {0} has no angle values. Expected e.g. '180,-60,-45'.")]
    EmptyJunction(usize),
}

/// Parses per-junction target angles written as `"w,f,p;w,f,p"`.
///
/// Junctions are separated by `;` and values by `,`. Whitespace is ignored
/// and an empty string yields no junctions. Junctions are numbered from 1
/// in error messages.
pub fn parse_angle_sets(text: &str) -> Result<Vec<Vec<f64>>, ParseError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    text.split(';')
        .enumerate()
        .map(|(index, junction)| {
            let junction_number = index + 1;
            if junction.trim().is_empty() {
                return Err(ParseError::EmptyJunction(junction_number));
            }
            junction
                .split(',')
                .map(|value| {
                    value.trim().parse::<f64>().map_err(|_| ParseError::InvalidAngle {
                        junction: junction_number,
                        value: value.trim().to_string(),
                    })
                })
                .collect()
        })
        .collect()
}
