/// Categorical palette, assigned to series by index.
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Color for dimmed series while another one is hovered.
pub const NEUTRAL: &str = "#ddd";

pub fn color(index: usize) -> &'static str {
    CATEGORY10[index % CATEGORY10.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_cycles() {
        assert_eq!(color(0), "#1f77b4");
        assert_eq!(color(10), color(0));
        assert_eq!(color(13), "#d62728");
    }
}
