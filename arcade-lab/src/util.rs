use anyhow::{anyhow, Context, Result};

/// Fallback first seed when neither `--seeds` nor `--seed-start` is given.
pub const DEFAULT_SEED_START: u32 = 0xA11C_0001;

/// Accepts decimal or `0x`-prefixed hex.
pub fn parse_seed(text: &str) -> Result<u32> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("empty seed"));
    }
    match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16)
            .with_context(|| format!("invalid hex seed: {trimmed}")),
        None => trimmed
            .parse::<u32>()
            .with_context(|| format!("invalid decimal seed: {trimmed}")),
    }
}

pub fn seed_to_hex(seed: u32) -> String {
    format!("0x{seed:08x}")
}

pub fn parse_seed_csv(input: &str) -> Result<Vec<u32>> {
    let seeds = input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(parse_seed)
        .collect::<Result<Vec<_>>>()?;
    if seeds.is_empty() {
        return Err(anyhow!("no seeds parsed from --seeds"));
    }
    Ok(seeds)
}

/// `count` seeds walked from `start` with a 32-bit LCG step.
pub fn seed_sequence(start: u32, count: u32) -> Vec<u32> {
    std::iter::successors(Some(start), |seed| {
        Some(seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223))
    })
    .take(count as usize)
    .collect()
}

/// Explicit CSV wins over a generated sequence.
pub fn resolve_seeds(csv: Option<&str>, start: Option<&str>, count: u32) -> Result<Vec<u32>> {
    if let Some(csv) = csv {
        return parse_seed_csv(csv);
    }
    if count == 0 {
        return Err(anyhow!("--seed-count must be >= 1"));
    }
    let start = start.map(parse_seed).transpose()?.unwrap_or(DEFAULT_SEED_START);
    Ok(seed_sequence(start, count))
}
