
// Parser tests
mod rule_parsing;
