//! Plain-text rendering of library and ring views.

use crate::catalog::SpellFilter;
use crate::ring::Ring;
use crate::types::{Placement, Spell};
use crate::utils::string::{capacity_bar, level_label, truncate_with_ellipsis};
use std::fmt::Write;

pub fn spell_line(spell: &Spell, width: usize) -> String {
    let class = if spell.class.is_empty() { "-" } else { spell.class.as_str() };
    let line = format!(
        "#{:<5} {} [{}] {} ({})",
        spell.id,
        spell.name,
        class,
        level_label(spell.level),
        spell.range
    );
    truncate_with_ellipsis(&line, width)
}

pub fn spell_detail(spell: &Spell) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "#{} {} - {} {}", spell.id, spell.name, spell.class, spell.kind);
    let _ = writeln!(out, "{} | Range: {}", level_label(spell.level), spell.range);

    let mut tags = Vec::new();
    if spell.requires_concentration() {
        tags.push("Concentration");
    }
    if spell.is_upcastable() {
        tags.push("Upcastable");
    }
    if !tags.is_empty() {
        let _ = writeln!(out, "{}", tags.join(", "));
    }

    if !spell.description.is_empty() {
        let _ = writeln!(out, "\n{}", spell.description);
    }
    if !spell.detail.is_empty() && spell.detail != spell.description {
        let _ = writeln!(out, "\n{}", spell.detail);
    }
    if spell.is_upcastable() {
        let _ = writeln!(out, "\nAt higher levels: {}", spell.upcast);
    }
    out.trim_end().to_string()
}

fn placement_line(placement: &Placement) -> String {
    let label = if placement.spell.is_cantrip() {
        level_label(0)
    } else {
        level_label(placement.spell.level.saturating_add(placement.upcast))
    };
    let upcast = if placement.upcast > 0 {
        format!(" (upcast +{})", placement.upcast)
    } else {
        String::new()
    };
    format!(
        "  [{}] {} - {}{}, costs {}",
        placement.id,
        placement.spell.name,
        label,
        upcast,
        placement.effective_level()
    )
}

pub fn ring_view(ring: &Ring) -> String {
    let mut out = format!(
        "Ring of Spell Storing {}  ({} levels stored, {} remaining)",
        capacity_bar(ring.current_total(), ring.capacity()),
        ring.current_total(),
        ring.remaining()
    );
    if ring.is_empty() {
        out.push_str("\n  (empty)");
    }
    for placement in ring.placements() {
        out.push('\n');
        out.push_str(&placement_line(placement));
    }
    out
}

pub fn library_view(spells: &[&Spell], filter: &SpellFilter, ring_full: bool, width: usize) -> String {
    let mut out = format!(
        "Spell Library ({} spells) class={} level={} search=\"{}\"",
        spells.len(),
        filter.class,
        filter.level,
        filter.search
    );
    if ring_full {
        out.push_str("\n  Ring is full; cast a spell before adding another.");
    }
    if spells.is_empty() {
        out.push_str("\n  No spells match the current filters.");
    }
    for spell in spells {
        out.push('\n');
        out.push_str(&spell_line(spell, width));
    }
    out
}
