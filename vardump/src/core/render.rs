//! Depth-bounded recursive renderer.
//!
//! Output convention for a value at depth `d`:
//!
//! ```text
//! TypeName
//! <indent × d>body
//! ```
//!
//! Sequences print `(len=L, cap=C)[a, b]`; a composite element (or any element
//! following one) starts on its own line at depth `d + 1`, and such a list
//! closes with `,` and a newline back at depth `d`. Maps and structs put every
//! entry on its own line. Past `max_depth` a container keeps its header and
//! collapses to `[...]` or `{...}`.

use std::fmt::Write;

use crate::core::classify::{deref, normalize};
use crate::core::types::{Dump, Field, MapShape, Seq, Shape};
use crate::io::config::DumpConfig;

/// Appends the rendering of values to a borrowed buffer.
pub struct Renderer<'b> {
    buf: &'b mut String,
    indent: &'b str,
    max_depth: usize,
}

impl<'b> Renderer<'b> {
    pub fn new(buf: &'b mut String, config: &'b DumpConfig) -> Self {
        Renderer {
            buf,
            indent: &config.indent,
            max_depth: config.max_depth,
        }
    }

    /// Render `value` with its type line, body indented `depth` times.
    pub fn render(&mut self, value: &dyn Dump, depth: usize) {
        let normalized = normalize(value);
        self.buf.push_str(&normalized.type_name);
        self.buf.push('\n');
        self.write_indent(depth);
        self.write_body(normalized.shape, depth);
    }

    fn write_body(&mut self, shape: Shape<'_>, depth: usize) {
        match shape {
            Shape::Nil => self.buf.push_str("<nil>"),
            Shape::Bool(value) => self.buf.push_str(if value { "true" } else { "false" }),
            Shape::Int(value) => self.write_display(value),
            Shape::Uint(value) => self.write_display(value),
            Shape::Float(value) => self.write_display(value),
            Shape::Str(value) => {
                self.buf.push('"');
                self.buf.push_str(&value);
                self.buf.push('"');
            }
            Shape::Chan(chan) => {
                self.write_display(format_args!(
                    "{:#x}(len={}, cap={})",
                    chan.addr, chan.len, chan.cap
                ));
            }
            Shape::Func(addr) => self.write_display(format_args!("{addr:#x}")),
            Shape::Array(seq) | Shape::Slice(seq) => self.write_seq(seq, depth),
            Shape::Map(map) => self.write_map(map, depth),
            Shape::Struct(fields) => self.write_struct(fields, depth),
            pointer @ Shape::Pointer(_) => self.write_body(deref(pointer), depth),
            Shape::Other(text) => self.buf.push_str(&text),
        }
    }

    fn write_seq(&mut self, seq: Seq<'_>, depth: usize) {
        self.write_display(format_args!("(len={}, cap={})", seq.len(), seq.cap));
        if depth > self.max_depth {
            self.buf.push_str("[...]");
            return;
        }

        self.buf.push('[');
        let mut broken = false;
        let mut after_composite = false;
        for (i, item) in seq.items.into_iter().enumerate() {
            let child = normalize(item);
            let composite = child.shape.is_composite();
            if i > 0 {
                self.buf.push(',');
            }
            if composite || after_composite {
                self.newline(depth + 1);
                broken = true;
            } else if i > 0 {
                self.buf.push(' ');
            }
            if seq.erased {
                self.write_annotation(&child.type_name);
            }
            self.write_body(child.shape, depth + 1);
            after_composite = composite;
        }
        if broken {
            self.buf.push(',');
            self.newline(depth);
        }
        self.buf.push(']');
    }

    fn write_map(&mut self, map: MapShape<'_>, depth: usize) {
        self.write_display(format_args!("(len={}) ", map.len()));
        if depth > self.max_depth {
            self.buf.push_str("{...}");
            return;
        }
        if map.is_empty() {
            self.buf.push_str("{}");
            return;
        }

        self.buf.push('{');
        for (key, value) in map.entries {
            self.newline(depth + 1);
            self.write_child(key, map.key_erased, depth + 1);
            self.buf.push_str(" : ");
            self.write_child(value, map.value_erased, depth + 1);
            self.buf.push(',');
        }
        self.newline(depth);
        self.buf.push('}');
    }

    fn write_struct(&mut self, fields: Vec<Field<'_>>, depth: usize) {
        if depth > self.max_depth {
            self.buf.push_str("{...}");
            return;
        }
        if fields.is_empty() {
            self.buf.push_str("{}");
            return;
        }

        self.buf.push('{');
        for field in fields {
            self.newline(depth + 1);
            self.buf.push_str(field.name);
            self.buf.push_str(" : ");
            self.write_child(field.value, true, depth + 1);
            self.buf.push(',');
        }
        self.newline(depth);
        self.buf.push('}');
    }

    fn write_child(&mut self, value: &dyn Dump, annotate: bool, depth: usize) {
        let child = normalize(value);
        if annotate {
            self.write_annotation(&child.type_name);
        }
        self.write_body(child.shape, depth);
    }

    fn write_annotation(&mut self, type_name: &str) {
        self.buf.push('(');
        self.buf.push_str(type_name);
        self.buf.push_str(") ");
    }

    fn newline(&mut self, depth: usize) {
        self.buf.push('\n');
        self.write_indent(depth);
    }

    fn write_indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.buf.push_str(self.indent);
        }
    }

    fn write_display(&mut self, value: impl std::fmt::Display) {
        // Writing into a String cannot fail.
        let _ = write!(self.buf, "{value}");
    }
}

/// Render a single value at depth 1 into a fresh string.
pub fn render(value: &dyn Dump, config: &DumpConfig) -> String {
    let mut buf = String::new();
    Renderer::new(&mut buf, config).render(value, 1);
    buf
}
