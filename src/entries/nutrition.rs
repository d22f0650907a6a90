use crate::error::ApiError;

/// Linear scaling of the declared per-serving facts to the weight actually
/// consumed. Pure; the result is stored at full precision and only rounded
/// for display.
pub fn compute(
    calories_per_serving: f64,
    protein_per_serving: f64,
    serving_size: f64,
    weight_consumed: f64,
) -> Result<(f64, f64), ApiError> {
    if !(serving_size > 0.0) {
        return Err(ApiError::InvalidInput(
            "serving size must be positive".into(),
        ));
    }
    if calories_per_serving < 0.0 || protein_per_serving < 0.0 || weight_consumed < 0.0 {
        return Err(ApiError::InvalidInput(
            "nutrition values must not be negative".into(),
        ));
    }

    let ratio = weight_consumed / serving_size;
    Ok((calories_per_serving * ratio, protein_per_serving * ratio))
}
