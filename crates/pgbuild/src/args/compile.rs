//! Template compiler and argument serializer.

use super::{Arg, Args};
use crate::param::Param;
use std::collections::HashSet;

impl Args {
    /// Compile `format` into SQL with `$1, $2, ...` placeholders.
    ///
    /// `initial` holds parameters already bound by an enclosing statement; the
    /// first placeholder emitted here is `$<initial.len() + 1>` and the returned
    /// list starts with `initial`.
    ///
    /// Malformed references never fail: an unknown `${name}`, an out-of-range
    /// `$n` or an exhausted `$?` emits nothing, and an unterminated `${` or an
    /// unrecognized `$x` is kept as literal text.
    pub fn compile(&self, format: &str, initial: Vec<Param>) -> (String, Vec<Param>) {
        let mut compiler = Compiler {
            args: self,
            buf: String::with_capacity(format.len()),
            values: initial,
            cursor: 0,
            consumed: HashSet::new(),
        };

        let mut rest = format;
        while let Some(idx) = rest.find('$') {
            compiler.buf.push_str(&rest[..idx]);
            rest = &rest[idx + 1..];

            // A trailing `$` is a normal character.
            let Some(&next) = rest.as_bytes().first() else {
                compiler.buf.push('$');
                break;
            };

            rest = match next {
                b'$' => {
                    compiler.buf.push('$');
                    &rest[1..]
                }
                b'{' => compiler.named(rest),
                b'0'..=b'9' if !self.only_named => compiler.digits(rest),
                b'?' if !self.only_named => {
                    compiler.successive();
                    &rest[1..]
                }
                _ => {
                    compiler.buf.push('$');
                    rest
                }
            };
        }
        compiler.buf.push_str(rest);

        compiler.finish()
    }
}

/// State of a single compilation.
struct Compiler<'a> {
    args: &'a Args,
    buf: String,
    values: Vec<Param>,
    /// Position used by the next `$?`.
    cursor: usize,
    /// Positions consumed through `${name}`.
    consumed: HashSet<usize>,
}

impl Compiler<'_> {
    /// `format` starts right after `$` and begins with `{`.
    fn named<'f>(&mut self, format: &'f str) -> &'f str {
        let Some(end) = format.find('}') else {
            #[cfg(feature = "tracing")]
            tracing::debug!("unterminated named reference kept as literal text");
            self.buf.push('$');
            return format;
        };

        let name = &format[1..end];
        match self.args.named.get(name) {
            Some(&position) => {
                self.consumed.insert(position);
                self.reference(position);
            }
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!(name, "dropping reference to unknown named argument");
            }
        }
        &format[end + 1..]
    }

    /// `format` starts right after `$` and begins with a digit.
    fn digits<'f>(&mut self, format: &'f str) -> &'f str {
        let end = format
            .bytes()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(format.len());
        let (digits, rest) = format.split_at(end);

        match digits.parse::<usize>() {
            Ok(position) => self.reference(position),
            Err(_) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(digits, "dropping positional reference that overflows usize");
            }
        }
        rest
    }

    /// Write the argument at `position` and point the cursor right after it.
    fn reference(&mut self, position: usize) {
        let args = self.args;
        match args.args.get(position) {
            Some(arg) => self.write_arg(arg),
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    position,
                    staged = args.args.len(),
                    "dropping out-of-range positional reference"
                );
            }
        }
        self.cursor = position.saturating_add(1);
    }

    /// Write the argument at the cursor and advance it.
    fn successive(&mut self) {
        let args = self.args;
        match args.args.get(self.cursor) {
            Some(arg) => {
                self.write_arg(arg);
                self.cursor += 1;
            }
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    cursor = self.cursor,
                    staged = args.args.len(),
                    "dropping `$?` past the last staged argument"
                );
            }
        }
    }

    fn write_arg(&mut self, arg: &Arg) {
        match arg {
            Arg::Value(param) => {
                self.buf.push('$');
                self.buf.push_str(&(self.values.len() + 1).to_string());
                self.values.push(param.clone());
            }
            Arg::Raw(expr) => self.buf.push_str(expr),
            Arg::Builder(builder) => {
                let initial = std::mem::take(&mut self.values);
                let (sql, values) = builder.build_with(initial);
                self.buf.push_str(&sql);
                self.values = values;
            }
            Arg::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.buf.push_str(", ");
                    }
                    self.write_arg(item);
                }
            }
        }
    }

    /// Append unconsumed deferred named arguments, ordered by position.
    fn finish(mut self) -> (String, Vec<Param>) {
        let args = self.args;
        let mut pending: Vec<usize> = args
            .deferred
            .values()
            .copied()
            .filter(|position| !self.consumed.contains(position))
            .collect();
        pending.sort_unstable();

        // Registration only lets values into `deferred`.
        for position in pending {
            if let Some(Arg::Value(param)) = args.args.get(position) {
                self.values.push(param.clone());
            }
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            sql_len = self.buf.len(),
            params = self.values.len(),
            "compiled SQL template"
        );

        (self.buf, self.values)
    }
}
