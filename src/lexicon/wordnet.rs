// lexicon/wordnet.rs - WordNet Database
// Loads the WordNet dict/ files (index.*, data.*, *.exc) into memory and answers
// sense lookups and Wu-Palmer similarity queries.
//
// Key Features:
// - Senses ordered noun, verb, adjective, adverb and by frequency within each
// - Gloss split into definition and quoted examples
// - Wu-Palmer similarity over hypernym and instance-hypernym links, with a
//   simulated root for parts of speech that have no single top node
//
// Used by: main.rs (loaded once at startup), lexicon/mod.rs

use std::collections::{HashMap, HashSet, VecDeque};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{morphy, LexicalDatabase, LexiconError, Pos, Sense};

// Quoted example sentences inside a gloss
static EXAMPLE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]*)""#).expect("Invalid example regex pattern"));

// Same as above, non-capturing, for stripping examples out of the definition
static QUOTED_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"".*?""#).expect("Invalid quoted text regex pattern"));

const ROOT_NAME: &str = "*ROOT*";

/// Raw text of the three files describing one part of speech
pub struct PosFiles<'a> {
    pub pos: Pos,
    pub index: &'a str,
    pub data: &'a str,
    pub exceptions: &'a str,
}

#[derive(Debug)]
struct Synset {
    pos: Pos,
    lemmas: Vec<String>,
    definition: String,
    examples: Vec<String>,
    hypernyms: Vec<usize>,
}

/// A node of the hypernym graph; `None` is the simulated root
type Node = Option<usize>;

pub struct WordNet {
    synsets: Vec<Synset>,
    by_offset: HashMap<(Pos, u32), usize>,
    index: HashMap<Pos, HashMap<String, Vec<u32>>>,
    exceptions: HashMap<Pos, HashMap<String, Vec<String>>>,
}

impl WordNet {
    /// Load every part of speech from a WordNet dict/ directory
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let dir = dir.as_ref();
        let mut contents = Vec::new();

        for pos in Pos::LOOKUP_ORDER {
            let suffix = pos.file_suffix();
            let index = read_file(&dir.join(format!("index.{}", suffix)))?;
            let data = read_file(&dir.join(format!("data.{}", suffix)))?;
            // Exception lists are optional, but one that exists must be readable
            let exc_path = dir.join(format!("{}.exc", suffix));
            let exceptions = match fs::read_to_string(&exc_path) {
                Ok(text) => text,
                Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
                Err(source) => {
                    return Err(LexiconError::Io {
                        path: exc_path.display().to_string(),
                        source,
                    })
                }
            };
            contents.push((pos, index, data, exceptions));
        }

        let files: Vec<PosFiles<'_>> = contents
            .iter()
            .map(|(pos, index, data, exceptions)| PosFiles {
                pos: *pos,
                index,
                data,
                exceptions,
            })
            .collect();

        let wordnet = Self::from_files(&files)?;
        log::info!(
            "[WORDNET] Loaded {} synsets from {}",
            wordnet.synsets.len(),
            dir.display()
        );
        Ok(wordnet)
    }

    /// Build the database from already-read file contents
    pub fn from_files(files: &[PosFiles<'_>]) -> Result<Self, LexiconError> {
        let mut synsets = Vec::new();
        let mut by_offset = HashMap::new();
        let mut pending_hypernyms: Vec<Vec<(Pos, u32)>> = Vec::new();
        let mut index = HashMap::new();
        let mut exceptions = HashMap::new();

        for file in files {
            let pos = file.pos.file_pos();
            let data_name = format!("data.{}", pos.file_suffix());

            for (line_no, line) in file.data.lines().enumerate() {
                // License header lines start with whitespace
                if line.is_empty() || line.starts_with(' ') {
                    continue;
                }
                let parsed = parse_data_line(line).map_err(|reason| LexiconError::Parse {
                    file: data_name.clone(),
                    line: line_no + 1,
                    reason,
                })?;
                by_offset.insert((pos, parsed.offset), synsets.len());
                pending_hypernyms.push(parsed.hypernyms);
                synsets.push(Synset {
                    pos: parsed.pos,
                    lemmas: parsed.lemmas,
                    definition: parsed.definition,
                    examples: parsed.examples,
                    hypernyms: Vec::new(),
                });
            }

            index.insert(pos, parse_index(file.index));
            exceptions.insert(pos, parse_exceptions(file.exceptions));
        }

        for (id, targets) in pending_hypernyms.into_iter().enumerate() {
            let mut resolved = Vec::with_capacity(targets.len());
            for (pos, offset) in targets {
                let target = by_offset
                    .get(&(pos, offset))
                    .ok_or(LexiconError::MissingSynset { pos, offset })?;
                resolved.push(*target);
            }
            synsets[id].hypernyms = resolved;
        }

        Ok(Self {
            synsets,
            by_offset,
            index,
            exceptions,
        })
    }

    pub fn synset_count(&self) -> usize {
        self.synsets.len()
    }

    fn is_indexed(&self, form: &str, pos: Pos) -> bool {
        self.index
            .get(&pos)
            .map(|lemmas| lemmas.contains_key(form))
            .unwrap_or(false)
    }

    /// Synset name in `lemma.pos.NN` form, NN being the sense number of the
    /// synset for its first lemma
    fn synset_name(&self, id: usize) -> String {
        let synset = &self.synsets[id];
        let lemma = synset
            .lemmas
            .first()
            .map(|l| l.to_lowercase())
            .unwrap_or_default();
        let file_pos = synset.pos.file_pos();
        let sense_number = self
            .index
            .get(&file_pos)
            .and_then(|lemmas| lemmas.get(&lemma))
            .and_then(|offsets| {
                offsets
                    .iter()
                    .position(|offset| self.by_offset.get(&(file_pos, *offset)) == Some(&id))
            })
            .unwrap_or(0)
            + 1;
        format!("{}.{}.{:02}", lemma, synset.pos.tag(), sense_number)
    }

    fn sense(&self, id: usize) -> Sense {
        let synset = &self.synsets[id];
        Sense {
            id,
            name: self.synset_name(id),
            pos: synset.pos,
            lemma_names: synset.lemmas.clone(),
            definition: synset.definition.clone(),
            examples: synset.examples.clone(),
        }
    }

    fn node_name(&self, node: Node) -> String {
        match node {
            Some(id) => self.synset_name(id),
            None => ROOT_NAME.to_string(),
        }
    }

    fn hypernyms(&self, node: Node) -> &[usize] {
        match node {
            Some(id) => &self.synsets[id].hypernyms,
            None => &[],
        }
    }

    /// The synset and everything above it
    fn ancestors(&self, id: usize) -> HashSet<usize> {
        let mut seen = HashSet::new();
        let mut todo = vec![id];
        while let Some(current) = todo.pop() {
            if seen.insert(current) {
                todo.extend(self.synsets[current].hypernyms.iter().copied());
            }
        }
        seen
    }

    /// Fewest hypernym steps from `node` up to a synset with no hypernyms.
    /// A chain that only loops back on itself counts up to its last new synset.
    fn min_depth(&self, node: Node) -> usize {
        let Some(start) = node else {
            return 0;
        };
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([(start, 0usize)]);
        let mut reached = 0;
        while let Some((current, depth)) = queue.pop_front() {
            let hypernyms = &self.synsets[current].hypernyms;
            if hypernyms.is_empty() {
                return depth;
            }
            reached = depth;
            for h in hypernyms {
                if seen.insert(*h) {
                    queue.push_back((*h, depth + 1));
                }
            }
        }
        reached
    }

    /// Most hypernym steps from `node` up to a top synset; links that close a
    /// loop are not followed
    fn max_depth(&self, node: Node) -> usize {
        let Some(start) = node else {
            return 0;
        };
        self.longest_chain(start, &mut HashSet::new(), &mut HashMap::new())
    }

    fn longest_chain(
        &self,
        id: usize,
        path: &mut HashSet<usize>,
        memo: &mut HashMap<usize, usize>,
    ) -> usize {
        if let Some(depth) = memo.get(&id) {
            return *depth;
        }
        path.insert(id);
        let mut depth = 0;
        for h in &self.synsets[id].hypernyms {
            if !path.contains(h) {
                depth = depth.max(1 + self.longest_chain(*h, path, memo));
            }
        }
        path.remove(&id);
        memo.insert(id, depth);
        depth
    }

    /// Shortest distance from `node` to each of its ancestors (itself at 0).
    /// With `simulate_root` the simulated root sits one step above the farthest one.
    fn hypernym_distances(&self, node: Node, simulate_root: bool) -> HashMap<Node, usize> {
        let mut distances = HashMap::new();
        if node.is_none() {
            distances.insert(None, 0);
            return distances;
        }

        let mut queue = VecDeque::from([(node, 0usize)]);
        while let Some((current, depth)) = queue.pop_front() {
            if distances.contains_key(&current) {
                continue;
            }
            distances.insert(current, depth);
            for h in self.hypernyms(current) {
                queue.push_back((Some(*h), depth + 1));
            }
        }

        if simulate_root {
            let farthest = distances.values().copied().max().unwrap_or(0);
            distances.insert(None, farthest + 1);
        }
        distances
    }

    fn shortest_path_distance(&self, a: Node, b: Node, simulate_root: bool) -> Option<usize> {
        if a == b {
            return Some(0);
        }
        let from_a = self.hypernym_distances(a, simulate_root);
        let from_b = self.hypernym_distances(b, simulate_root);
        from_a
            .iter()
            .filter_map(|(node, d1)| from_b.get(node).map(|d2| d1 + d2))
            .min()
    }

    /// Wu-Palmer similarity: 2 * depth(lcs) / (len(a, lcs) + len(b, lcs) + 2 * depth(lcs))
    fn wup_similarity(&self, a: usize, b: usize) -> Option<f64> {
        let need_root = self.synsets[a].pos != Pos::Noun || self.synsets[b].pos != Pos::Noun;

        let ancestors_b = self.ancestors(b);
        let mut common: Vec<Node> = self
            .ancestors(a)
            .into_iter()
            .filter(|id| ancestors_b.contains(id))
            .map(Some)
            .collect();
        if need_root {
            common.push(None);
        }

        let deepest = common.iter().map(|node| self.min_depth(*node)).max()?;
        let mut lowest: Vec<(String, Node)> = common
            .into_iter()
            .filter(|node| self.min_depth(*node) == deepest)
            .map(|node| (self.node_name(node), node))
            .collect();
        lowest.sort_by(|x, y| x.0.cmp(&y.0));

        let subsumer = if lowest.iter().any(|(_, node)| *node == Some(a)) {
            Some(a)
        } else {
            lowest.first()?.1
        };

        let depth = self.max_depth(subsumer) + 1;
        let len_a = self.shortest_path_distance(Some(a), subsumer, need_root)? + depth;
        let len_b = self.shortest_path_distance(Some(b), subsumer, need_root)? + depth;

        Some((2.0 * depth as f64) / (len_a + len_b) as f64)
    }
}

impl LexicalDatabase for WordNet {
    fn lookup(&self, word: &str) -> Result<Vec<Sense>, LexiconError> {
        let word = word.to_lowercase();
        let mut senses = Vec::new();

        for pos in Pos::LOOKUP_ORDER {
            let Some(lemmas) = self.index.get(&pos) else {
                continue;
            };
            let forms = morphy::base_forms(&word, pos, self.exceptions.get(&pos), |form| {
                self.is_indexed(form, pos)
            });

            for form in forms {
                for offset in lemmas.get(&form).into_iter().flatten() {
                    let id = self
                        .by_offset
                        .get(&(pos, *offset))
                        .ok_or(LexiconError::MissingSynset {
                            pos,
                            offset: *offset,
                        })?;
                    senses.push(self.sense(*id));
                }
            }
        }

        Ok(senses)
    }

    fn similarity(&self, a: &Sense, b: &Sense) -> Option<f64> {
        if a.id >= self.synsets.len() || b.id >= self.synsets.len() {
            return None;
        }
        self.wup_similarity(a.id, b.id)
    }
}

fn read_file(path: &Path) -> Result<String, LexiconError> {
    fs::read_to_string(path).map_err(|source| LexiconError::Io {
        path: path.display().to_string(),
        source,
    })
}

struct ParsedSynset {
    offset: u32,
    pos: Pos,
    lemmas: Vec<String>,
    definition: String,
    examples: Vec<String>,
    hypernyms: Vec<(Pos, u32)>,
}

// synset_offset lex_filenum ss_type w_cnt word lex_id [word lex_id...] p_cnt [ptr...] [frames...] | gloss
fn parse_data_line(line: &str) -> Result<ParsedSynset, String> {
    let (columns, gloss) = line.split_once('|').unwrap_or((line, ""));
    let mut tokens = columns.split_whitespace();
    let mut next = |what: &str| tokens.next().ok_or_else(|| format!("missing {}", what));

    let offset = next("offset")?
        .parse::<u32>()
        .map_err(|e| format!("bad offset: {}", e))?;
    next("lex_filenum")?;
    let ss_type = next("ss_type")?;
    let pos = Pos::from_tag(ss_type).ok_or_else(|| format!("unknown ss_type '{}'", ss_type))?;

    let word_count = usize::from_str_radix(next("w_cnt")?, 16)
        .map_err(|e| format!("bad w_cnt: {}", e))?;
    if word_count == 0 {
        return Err("synset without lemmas".to_string());
    }
    let mut lemmas = Vec::with_capacity(word_count);
    for _ in 0..word_count {
        let word = next("word")?;
        // Adjective syntactic markers: "big(a)", "galore(ip)"
        let word = word.split('(').next().unwrap_or(word);
        lemmas.push(word.to_string());
        next("lex_id")?;
    }

    let pointer_count = next("p_cnt")?
        .parse::<usize>()
        .map_err(|e| format!("bad p_cnt: {}", e))?;
    let mut hypernyms = Vec::new();
    for _ in 0..pointer_count {
        let symbol = next("pointer_symbol")?;
        let target = next("pointer offset")?
            .parse::<u32>()
            .map_err(|e| format!("bad pointer offset: {}", e))?;
        let target_pos = next("pointer pos")?;
        next("source/target")?;

        if symbol == "@" || symbol == "@i" {
            let target_pos = Pos::from_tag(target_pos)
                .ok_or_else(|| format!("unknown pointer pos '{}'", target_pos))?;
            hypernyms.push((target_pos.file_pos(), target));
        }
    }

    let examples = EXAMPLE_REGEX
        .captures_iter(gloss)
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
        .collect();
    let definition = QUOTED_REGEX
        .replace_all(gloss, "")
        .trim()
        .trim_matches(|c| c == ';' || c == ' ')
        .to_string();

    Ok(ParsedSynset {
        offset,
        pos,
        lemmas,
        definition,
        examples,
        hypernyms,
    })
}

// lemma pos synset_cnt p_cnt [ptr_symbol...] sense_cnt tagsense_cnt synset_offset [synset_offset...]
fn parse_index(text: &str) -> HashMap<String, Vec<u32>> {
    let mut lemmas = HashMap::new();
    for line in text.lines() {
        if line.is_empty() || line.starts_with(' ') {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let synset_count = match tokens.get(2).and_then(|t| t.parse::<usize>().ok()) {
            Some(count) if count <= tokens.len() => count,
            _ => {
                log::warn!("[WORDNET] Skipping malformed index line: '{}'", line);
                continue;
            }
        };
        let offsets: Vec<u32> = tokens[tokens.len() - synset_count..]
            .iter()
            .filter_map(|t| t.parse().ok())
            .collect();
        lemmas.insert(tokens[0].to_string(), offsets);
    }
    lemmas
}

fn parse_exceptions(text: &str) -> HashMap<String, Vec<String>> {
    text.lines()
        .filter_map(|line| {
            let mut words = line.split_whitespace();
            let inflected = words.next()?;
            Some((inflected.to_string(), words.map(str::to_string).collect()))
        })
        .collect()
}
