/* PORTED NUMPY FUNCTIONS */

use rustfft::num_complex::Complex;

/// Returns the location of the maximum element in the array.
///
/// Like `numpy.argmax`, the first occurrence wins when the maximum repeats.
///
/// # Arguments
///
/// * `arr` - Input array.
///
/// # Returns
///
/// * The location of the maximum element in the array, or `None` if the array is empty.
pub fn arg_max(arr: &[f64]) -> Option<usize> {
    arr.iter()
        .enumerate()
        .reduce(|(max_index, max_value), (current_index, current_value)| {
            if current_value > max_value {
                (current_index, current_value)
            } else {
                (max_index, max_value)
            }
        })
        .map(|(index, _)| index)
}

/// Element-wise magnitude of a complex array, `numpy.absolute`.
pub fn absolute(arr: &[Complex<f64>]) -> Vec<f64> {
    arr.iter().map(|c| c.norm()).collect()
}
