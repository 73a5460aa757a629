use anyhow::{anyhow, bail, Result};

/// Parses an edge-list argument such as `[(0, 1), (1, 2), (2, 0)]`.
///
/// Endpoints may be negative here; range checks belong to `Graph::build`.
pub fn parse_edge_list(input: &str) -> Result<Vec<(i64, i64)>> {
    let mut cur = Cursor { src: input, pos: 0 };
    let mut edges = Vec::new();

    cur.skip_ws();
    cur.expect('[')?;
    cur.skip_ws();

    while !cur.eat(']') {
        edges.push(cur.tuple()?);
        cur.skip_ws();
        if cur.eat(',') {
            cur.skip_ws();
            continue;
        }
        cur.skip_ws();
        cur.expect(']')?;
        break;
    }

    cur.skip_ws();
    if let Some(ch) = cur.peek() {
        bail!("edges: unexpected trailing {ch:?} at offset {}", cur.pos);
    }
    Ok(edges)
}

/// Largest endpoint in `edges`, the implicit vertex bound.
pub fn max_endpoint(edges: &[(i64, i64)]) -> Option<i64> {
    edges.iter().map(|&(u, v)| u.max(v)).max()
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn skip_ws(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn eat(&mut self, want: char) -> bool {
        if self.peek() == Some(want) {
            self.pos += want.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, want: char) -> Result<()> {
        if self.eat(want) {
            return Ok(());
        }
        match self.peek() {
            Some(got) => Err(anyhow!(
                "edges: expected {want:?} at offset {}, found {got:?}",
                self.pos
            )),
            None => Err(anyhow!("edges: expected {want:?} but input ended")),
        }
    }

    /// `(u, v)` with an optional trailing comma inside the parentheses.
    fn tuple(&mut self) -> Result<(i64, i64)> {
        self.expect('(')?;
        self.skip_ws();
        let u = self.int()?;
        self.skip_ws();
        self.expect(',')?;
        self.skip_ws();
        let v = self.int()?;
        self.skip_ws();
        if self.eat(',') {
            self.skip_ws();
        }
        self.expect(')')
            .map_err(|e| anyhow!("{e} (each edge must be a tuple of two integers: (u, v))"))?;
        Ok((u, v))
    }

    fn int(&mut self) -> Result<i64> {
        let start = self.pos;
        if self.peek() == Some('-') || self.peek() == Some('+') {
            self.pos += 1;
        }
        while matches!(self.peek(), Some(ch) if ch.is_ascii_digit()) {
            self.pos += 1;
        }
        let text = &self.src[start..self.pos];
        text.parse::<i64>()
            .map_err(|e| anyhow!("edges: invalid integer {text:?} at offset {start}: {e}"))
    }
}
