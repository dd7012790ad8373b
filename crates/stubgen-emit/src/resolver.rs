//! Class-name → module-path index for cross-reference imports.

use std::collections::HashMap;

use stubgen_schema::Module;

/// Maps a class name to the hierarchy path of its *containing* module
/// (walk root first, class name not included).
pub type ClassIndex = HashMap<String, Vec<String>>;

/// Build the lookup index for a schema tree.
///
/// Classes of a module are recorded before its nested modules are visited.
/// A class name is recorded at most once: when two modules define classes
/// with the same name, the most recently visited mapping wins. Emission
/// only uses the index to decide whether and from where to import a
/// referenced name, so this is a precision limit, not a collision error.
pub fn build_index(root: &Module) -> ClassIndex {
    let mut index = ClassIndex::new();
    let mut path = vec![root.name.clone()];
    visit(root, &mut path, &mut index);
    index
}

fn visit(module: &Module, path: &mut Vec<String>, index: &mut ClassIndex) {
    for class in module.classes() {
        index.insert(class.name.clone(), path.clone());
    }
    for submodule in module.submodules() {
        path.push(submodule.name.clone());
        visit(submodule, path, index);
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use stubgen_schema::{Class, Member, Module};

    use super::*;

    fn class(name: &str) -> Member {
        Member::Class(Class {
            name: name.into(),
            doc: None,
            methods: vec![],
            properties: vec![],
            fields: vec![],
            superclasses: vec![],
            enum_members: None,
        })
    }

    fn module(name: &str, members: Vec<Member>) -> Module {
        Module {
            name: name.into(),
            doc: None,
            members,
        }
    }

    #[test]
    fn records_containing_module_path() {
        let root = module(
            "Live",
            vec![
                class("Song"),
                Member::Module(module("MidiMap", vec![class("Forwarder")])),
            ],
        );
        let index = build_index(&root);
        assert_eq!(index["Song"], vec!["Live"]);
        assert_eq!(index["Forwarder"], vec!["Live", "MidiMap"]);
    }

    #[test]
    fn duplicate_class_names_are_last_write_wins() {
        let root = module(
            "Live",
            vec![
                Member::Module(module("Audio", vec![class("Track")])),
                Member::Module(module("Midi", vec![class("Track")])),
            ],
        );
        let index = build_index(&root);
        // Midi is visited after Audio.
        assert_eq!(index["Track"], vec!["Live", "Midi"]);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn own_classes_beat_earlier_siblings_but_not_later_ones() {
        let root = module(
            "Live",
            vec![
                class("Device"),
                Member::Module(module("Rack", vec![class("Device")])),
            ],
        );
        let index = build_index(&root);
        // Root classes are indexed first, then the nested module overwrites.
        assert_eq!(index["Device"], vec!["Live", "Rack"]);
    }
}
