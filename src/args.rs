//! Size tool argument normalization
//!
//! Lets callers pass bare flag letters (`B`, `t`) for the size tool. A token
//! without a leading `-` gets one, except the value right after `-o`.

/// Flag whose following token is a literal value
const OUTPUT_FLAG: &str = "-o";

/// Prefix bare size tool arguments with `-`
///
/// # Examples
///
/// ```
/// use codesize_diff::args::normalize_size_tool_args;
///
/// let args = vec!["B".to_string(), "-o".to_string(), "out.txt".to_string(), "t".to_string()];
/// assert_eq!(normalize_size_tool_args(&args), vec!["-B", "-o", "out.txt", "-t"]);
/// ```
pub fn normalize_size_tool_args(args: &[String]) -> Vec<String> {
    args.iter()
        .enumerate()
        .map(|(i, arg)| {
            let follows_output_flag = i > 0 && args[i - 1] == OUTPUT_FLAG;
            if arg.starts_with('-') || follows_output_flag {
                arg.clone()
            } else {
                format!("-{}", arg)
            }
        })
        .collect()
}
