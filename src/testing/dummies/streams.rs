/// Three steps over nodes 1, 2 and 3; every node ends in class 2.
pub fn three_line_steps() -> Vec<Vec<u64>> {
    vec![vec![1, 2], vec![1, 3], vec![2, 3]]
}

/// [`three_line_steps`] as tab-separated input for column 0.
pub const THREE_LINE_TSV: &str = "1\t2\n1\t3\n2\t3\n";
