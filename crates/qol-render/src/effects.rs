// SPDX-License-Identifier: MIT
//
// Cosmetic text effects: a typewriter and a glitchy left-to-right reveal.
//
// Both write straight to a caller-supplied sink and sleep between steps.
// Zero durations skip the sleeps entirely, which is how tests run them.

use std::io::{self, Write};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use qol_term::{Style, ansi};

fn pause(d: Duration) {
    if !d.is_zero() {
        thread::sleep(d);
    }
}

// ─── Typewriter ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypewriterOptions {
    /// Delay after each ordinary character.
    pub delay: Duration,
    /// Characters followed by `pause` instead of `delay`.
    pub pause_chars: String,
    pub pause: Duration,
    pub style: Style,
}

impl Default for TypewriterOptions {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(50),
            pause_chars: ".!?".to_string(),
            pause: Duration::from_millis(300),
            style: Style::new(),
        }
    }
}

/// Write `text` one character at a time, then a newline.
pub fn typewriter(w: &mut impl Write, text: &str, options: &TypewriterOptions) -> io::Result<()> {
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        w.write_all(options.style.paint(ch.encode_utf8(&mut buf)).as_bytes())?;
        w.flush()?;
        if options.pause_chars.contains(ch) {
            pause(options.pause);
        } else {
            pause(options.delay);
        }
    }
    w.write_all(b"\n")?;
    w.flush()
}

// ─── Glitch ──────────────────────────────────────────────────────────────────

/// xorshift64: tiny, fast, good enough for picking noise glyphs.
#[derive(Debug, Clone)]
pub struct XorShift(u64);

impl XorShift {
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        // Zero is a fixed point of xorshift.
        Self(if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed })
    }

    pub const fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    /// Uniform-ish index in `0..n`; always 0 when `n` is 0.
    pub fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        let n = n as u64;
        usize::try_from(self.next_u64() % n).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlitchOptions {
    /// Time to reveal one character, split across `iterations` frames.
    pub delay: Duration,
    /// Noise frames per revealed character.
    pub iterations: usize,
    /// Noise alphabet.
    pub glyphs: String,
    pub seed: u64,
}

impl Default for GlitchOptions {
    fn default() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs() ^ u64::from(d.subsec_nanos()));
        Self {
            delay: Duration::from_millis(30),
            iterations: 3,
            glyphs: "!@#$%^&*()_+-=[]{}|;:,.<>?/\\~`".to_string(),
            seed,
        }
    }
}

/// Reveal `text` left to right. Characters not yet revealed show as
/// random glyphs (spaces stay spaces); the final frame is the text itself
/// followed by a newline.
pub fn glitch_line(w: &mut impl Write, text: &str, options: &GlitchOptions) -> io::Result<()> {
    let chars: Vec<char> = text.chars().collect();
    let noise: Vec<char> = options.glyphs.chars().collect();
    let mut rng = XorShift::new(options.seed);
    let iterations = options.iterations.max(1);
    let step = options.delay / u32::try_from(iterations).unwrap_or(u32::MAX);

    if !noise.is_empty() {
        let mut frame = String::with_capacity(text.len());
        for revealed in 0..chars.len() {
            for _ in 0..iterations {
                frame.clear();
                frame.extend(chars[..revealed].iter());
                frame.extend(chars[revealed..].iter().map(|&c| {
                    if c == ' ' { ' ' } else { noise[rng.below(noise.len())] }
                }));
                ansi::carriage_return(w)?;
                ansi::clear_line(w)?;
                w.write_all(frame.as_bytes())?;
                w.flush()?;
                pause(step);
            }
        }
    }

    ansi::carriage_return(w)?;
    ansi::clear_line(w)?;
    w.write_all(text.as_bytes())?;
    w.write_all(b"\n")?;
    w.flush()
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use qol_term::{Color, strip_style};

    fn instant_typewriter() -> TypewriterOptions {
        TypewriterOptions {
            delay: Duration::ZERO,
            pause: Duration::ZERO,
            ..TypewriterOptions::default()
        }
    }

    fn instant_glitch(seed: u64) -> GlitchOptions {
        GlitchOptions {
            delay: Duration::ZERO,
            seed,
            ..GlitchOptions::default()
        }
    }

    #[test]
    fn typewriter_writes_text_and_newline() {
        let mut out = Vec::new();
        typewriter(&mut out, "Hi. Bye!", &instant_typewriter()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Hi. Bye!\n");
    }

    #[test]
    fn typewriter_paints_each_character() {
        let mut out = Vec::new();
        let options = TypewriterOptions {
            style: Style::new().fg(Color::GREEN),
            ..instant_typewriter()
        };
        typewriter(&mut out, "ok", &options).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\x1b[32mo\x1b[0m\x1b[32mk\x1b[0m\n"
        );
    }

    #[test]
    fn xorshift_is_deterministic_and_nonzero() {
        let mut a = XorShift::new(7);
        let mut b = XorShift::new(7);
        for _ in 0..10 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
        let mut z = XorShift::new(0);
        assert_ne!(z.next_u64(), 0);
        assert!((0..100).all(|_| z.below(5) < 5));
    }

    #[test]
    fn below_zero_is_zero() {
        let mut rng = XorShift::new(11);
        assert_eq!(rng.below(0), 0);
        assert_eq!(rng.below(1), 0);
    }

    #[test]
    fn glitch_ends_on_the_text() {
        let mut out = Vec::new();
        glitch_line(&mut out, "ACCESS GRANTED", &instant_glitch(42)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("\r\x1b[2KACCESS GRANTED\n"));
    }

    #[test]
    fn glitch_frames_reveal_prefix_and_keep_spaces() {
        let mut out = Vec::new();
        glitch_line(&mut out, "ab cd", &instant_glitch(1)).unwrap();
        let text = strip_style(&String::from_utf8(out).unwrap());
        let frames: Vec<&str> = text.trim_end_matches('\n').split('\r').skip(1).collect();
        // 5 characters × 3 iterations, plus the final frame.
        assert_eq!(frames.len(), 16);
        for (i, frame) in frames.iter().enumerate().take(15) {
            let revealed = i / 3;
            let chars: Vec<char> = frame.chars().collect();
            assert_eq!(chars.len(), 5);
            assert_eq!(chars[..revealed], "ab cd".chars().take(revealed).collect::<Vec<_>>()[..]);
            assert_eq!(chars[2], ' ');
        }
        assert_eq!(frames[15], "ab cd");
    }

    #[test]
    fn glitch_same_seed_same_output() {
        let run = |seed| {
            let mut out = Vec::new();
            glitch_line(&mut out, "noise", &instant_glitch(seed)).unwrap();
            out
        };
        assert_eq!(run(9), run(9));
    }

    #[test]
    fn empty_noise_alphabet_prints_plainly() {
        let mut out = Vec::new();
        let options = GlitchOptions {
            glyphs: String::new(),
            ..instant_glitch(3)
        };
        glitch_line(&mut out, "x", &options).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\r\x1b[2Kx\n");
    }
}
