//! Built-in Verilog examples.

/// Example loaded into the tab created at startup.
pub const BOOTSTRAP_EXAMPLE: &str = "hello";

const HELLO: &str = r#"module hello;
initial begin
  $display("Hello, VLSI World!");
  $finish;
end
endmodule"#;

const COUNTER: &str = r#"module counter;
reg [3:0] count;
initial begin
  count = 0;
  repeat (10) begin
    #5 count = count + 1;
    $display("Count = %d", count);
  end
  $finish;
end
endmodule"#;

const EXAMPLES: &[(&str, &str)] = &[("hello", HELLO), ("counter", COUNTER)];

/// Looks up an example by name.
pub fn example(name: &str) -> Option<&'static str> {
    EXAMPLES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, source)| *source)
}

/// Example names in display order.
pub fn names() -> impl Iterator<Item = &'static str> {
    EXAMPLES.iter().map(|(n, _)| *n)
}

/// Source of the startup tab.
pub fn bootstrap_source() -> &'static str {
    HELLO
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert!(example("hello").unwrap().contains("Hello, VLSI World!"));
        assert!(example("counter").unwrap().contains("repeat (10)"));
        assert!(example("adder").is_none());
    }

    #[test]
    fn test_names_order() {
        assert_eq!(names().collect::<Vec<_>>(), vec!["hello", "counter"]);
    }

    #[test]
    fn test_bootstrap_matches_table() {
        assert_eq!(Some(bootstrap_source()), example(BOOTSTRAP_EXAMPLE));
    }
}
