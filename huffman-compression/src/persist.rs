use std::collections::{BTreeMap, HashMap};

use log::debug;

use crate::{
    error::{HuffmanError, Result},
    prefix_code_table::{CodeTable, ETB_CHAR},
};

impl CodeTable {
    /// `{"\u0017":"100","A":"101","B":"0","C":"11"}`
    pub fn to_json(&self) -> Result<String> {
        let sorted = self
            .iter()
            .map(|(ch, code)| (ch.to_string(), code))
            .collect::<BTreeMap<_, _>>();
        serde_json::to_string(&sorted).map_err(|err| invalid(err.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, String> =
            serde_json::from_str(json).map_err(|err| invalid(err.to_string()))?;

        let mut codes = HashMap::with_capacity(raw.len());
        for (key, code) in raw {
            let mut chars = key.chars();
            let ch = match (chars.next(), chars.next()) {
                (Some(ch), None) => ch,
                _ => return Err(invalid(format!("key {key:?} is not a single character"))),
            };
            if !code.chars().all(|bit| bit == '0' || bit == '1') {
                return Err(invalid(format!("code {code:?} for {ch:?} is not binary")));
            }
            codes.insert(ch, code);
        }

        validate(&codes)?;
        debug!("loaded code table with {} codes", codes.len());
        Ok(Self::from_codes(codes))
    }
}

fn validate(codes: &HashMap<char, String>) -> Result<()> {
    if !codes.contains_key(&ETB_CHAR) {
        return Err(invalid("missing the end of transmission code".to_owned()));
    }
    if codes.len() > 1 {
        if let Some((ch, _)) = codes.iter().find(|(_, code)| code.is_empty()) {
            return Err(invalid(format!("empty code for {ch:?}")));
        }
    }

    // after sorting, a code that prefixes another sorts directly before one it prefixes
    let mut sorted = codes.iter().map(|(ch, code)| (code, *ch)).collect::<Vec<_>>();
    sorted.sort();
    for pair in sorted.windows(2) {
        let (shorter, a) = pair[0];
        let (longer, b) = pair[1];
        if longer.starts_with(shorter.as_str()) {
            return Err(invalid(format!(
                "code {shorter:?} for {a:?} is a prefix of {longer:?} for {b:?}"
            )));
        }
    }
    Ok(())
}

fn invalid(reason: String) -> HuffmanError {
    HuffmanError::InvalidTable { reason }
}
