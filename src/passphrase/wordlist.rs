//! Built-in passphrase word list.

/// 128 distinct lowercase words, 7 bits per word.
pub const WORDS: &[&str] = &[
    "acorn", "amber", "anchor", "anvil", "apple", "arrow", "aspen", "atlas",
    "badge", "bamboo", "banjo", "barley", "basil", "beacon", "birch", "bison",
    "blaze", "bramble", "breeze", "bridge", "bronze", "button", "cactus", "canyon",
    "carbon", "castle", "cedar", "cherry", "cinder", "clover", "cobalt", "comet",
    "copper", "coral", "cosmos", "cricket", "crystal", "dahlia", "delta", "desert",
    "dolphin", "dragon", "drift", "eagle", "ember", "falcon", "fern", "fjord",
    "forest", "fossil", "garnet", "geyser", "ginger", "glacier", "granite", "gravel",
    "harbor", "hazel", "heron", "hickory", "horizon", "iceberg", "indigo", "island",
    "ivory", "jasper", "juniper", "kelp", "kettle", "lagoon", "lantern", "lemon",
    "lichen", "linen", "lotus", "magnet", "maple", "marble", "meadow", "meteor",
    "mirror", "mosaic", "nectar", "nimbus", "nutmeg", "oasis", "ocean", "olive",
    "onyx", "orbit", "orchid", "otter", "paddle", "panther", "pebble", "pepper",
    "pigeon", "pine", "planet", "prairie", "quartz", "quill", "raven", "reef",
    "ribbon", "river", "saddle", "saffron", "sequoia", "shadow", "silver", "sparrow",
    "spruce", "summit", "thistle", "thunder", "timber", "topaz", "tundra", "tulip",
    "velvet", "violet", "walnut", "willow", "winter", "yarrow", "zenith", "zephyr",
];
