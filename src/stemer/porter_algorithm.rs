//! Porter suffix-stripping stemmer (M.F. Porter, 1980).
//!
//! Works on lower-case input. Letters outside `a..z` are treated as
//! consonants, so non-English words pass through mostly untouched.

struct Word {
    b: Vec<char>,
}

impl Word {
    fn is_consonant(&self, i: usize) -> bool {
        match self.b[i] {
            'a' | 'e' | 'i' | 'o' | 'u' => false,
            'y' => i == 0 || !self.is_consonant(i - 1),
            _ => true,
        }
    }

    /// Number of VC sequences in `b[..len]`.
    fn measure(&self, len: usize) -> usize {
        let mut m = 0;
        let mut i = 0;
        while i < len && self.is_consonant(i) {
            i += 1;
        }
        loop {
            while i < len && !self.is_consonant(i) {
                i += 1;
            }
            if i >= len {
                return m;
            }
            while i < len && self.is_consonant(i) {
                i += 1;
            }
            m += 1;
        }
    }

    fn has_vowel(&self, len: usize) -> bool {
        (0..len).any(|i| !self.is_consonant(i))
    }

    fn ends_double_consonant(&self, len: usize) -> bool {
        len >= 2 && self.b[len - 1] == self.b[len - 2] && self.is_consonant(len - 1)
    }

    /// consonant-vowel-consonant ending, where the last consonant is not w, x or y
    fn ends_cvc(&self, len: usize) -> bool {
        len >= 3
            && self.is_consonant(len - 3)
            && !self.is_consonant(len - 2)
            && self.is_consonant(len - 1)
            && !matches!(self.b[len - 1], 'w' | 'x' | 'y')
    }

    /// Length of the stem left over when `suffix` is removed, if the word ends with it.
    fn stem_len(&self, suffix: &str) -> Option<usize> {
        let suffix: Vec<char> = suffix.chars().collect();
        if self.b.len() >= suffix.len() && self.b.ends_with(&suffix) {
            Some(self.b.len() - suffix.len())
        } else {
            None
        }
    }

    fn set_suffix(&mut self, stem_len: usize, replacement: &str) {
        self.b.truncate(stem_len);
        self.b.extend(replacement.chars());
    }

    /// Applies the first rule whose suffix matches, if its stem has measure > `min_measure`.
    fn apply_first(&mut self, rules: &[(&str, &str)], min_measure: usize) {
        for &(suffix, replacement) in rules {
            if let Some(stem) = self.stem_len(suffix) {
                if self.measure(stem) > min_measure {
                    self.set_suffix(stem, replacement);
                }
                return;
            }
        }
    }

    fn step1a(&mut self) {
        if let Some(stem) = self.stem_len("sses") {
            self.set_suffix(stem, "ss");
        } else if let Some(stem) = self.stem_len("ies") {
            self.set_suffix(stem, "i");
        } else if self.stem_len("ss").is_none() {
            if let Some(stem) = self.stem_len("s") {
                self.set_suffix(stem, "");
            }
        }
    }

    fn step1b(&mut self) {
        if let Some(stem) = self.stem_len("eed") {
            if self.measure(stem) > 0 {
                self.set_suffix(stem, "ee");
            }
            return;
        }

        let stripped = ["ed", "ing"].iter().find_map(|suffix| {
            self.stem_len(suffix)
                .filter(|&stem| self.has_vowel(stem))
        });
        let Some(stem) = stripped else {
            return;
        };
        self.set_suffix(stem, "");

        for (suffix, replacement) in [("at", "ate"), ("bl", "ble"), ("iz", "ize")] {
            if let Some(stem) = self.stem_len(suffix) {
                self.set_suffix(stem, replacement);
                return;
            }
        }

        let len = self.b.len();
        if self.ends_double_consonant(len) && !matches!(self.b[len - 1], 'l' | 's' | 'z') {
            self.b.pop();
        } else if self.measure(len) == 1 && self.ends_cvc(len) {
            self.b.push('e');
        }
    }

    fn step1c(&mut self) {
        if let Some(stem) = self.stem_len("y") {
            if self.has_vowel(stem) {
                self.set_suffix(stem, "i");
            }
        }
    }

    fn step2(&mut self) {
        self.apply_first(
            &[
                ("ational", "ate"),
                ("tional", "tion"),
                ("enci", "ence"),
                ("anci", "ance"),
                ("izer", "ize"),
                ("abli", "able"),
                ("alli", "al"),
                ("entli", "ent"),
                ("eli", "e"),
                ("ousli", "ous"),
                ("ization", "ize"),
                ("ation", "ate"),
                ("ator", "ate"),
                ("alism", "al"),
                ("iveness", "ive"),
                ("fulness", "ful"),
                ("ousness", "ous"),
                ("aliti", "al"),
                ("iviti", "ive"),
                ("biliti", "ble"),
            ],
            0,
        );
    }

    fn step3(&mut self) {
        self.apply_first(
            &[
                ("icate", "ic"),
                ("ative", ""),
                ("alize", "al"),
                ("iciti", "ic"),
                ("ical", "ic"),
                ("ful", ""),
                ("ness", ""),
            ],
            0,
        );
    }

    fn step4(&mut self) {
        const SUFFIXES: [&str; 19] = [
            "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion",
            "ou", "ism", "ate", "iti", "ous", "ive", "ize",
        ];
        for suffix in SUFFIXES {
            let Some(stem) = self.stem_len(suffix) else {
                continue;
            };
            // -ion only counts after s or t
            if suffix == "ion" && (stem == 0 || !matches!(self.b[stem - 1], 's' | 't')) {
                continue;
            }
            if self.measure(stem) > 1 {
                self.set_suffix(stem, "");
            }
            return;
        }
    }

    fn step5a(&mut self) {
        if let Some(stem) = self.stem_len("e") {
            let m = self.measure(stem);
            if m > 1 || (m == 1 && !self.ends_cvc(stem)) {
                self.set_suffix(stem, "");
            }
        }
    }

    fn step5b(&mut self) {
        let len = self.b.len();
        if self.measure(len) > 1 && self.ends_double_consonant(len) && self.b[len - 1] == 'l' {
            self.b.pop();
        }
    }
}

pub fn porter_stem(word: &str) -> String {
    if word.chars().count() <= 2 {
        return word.to_string();
    }

    let mut w = Word {
        b: word.chars().collect(),
    };
    w.step1a();
    w.step1b();
    w.step1c();
    w.step2();
    w.step3();
    w.step4();
    w.step5a();
    w.step5b();

    w.b.into_iter().collect()
}
