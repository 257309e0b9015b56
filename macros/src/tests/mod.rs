//! Tests for the procedural macros
