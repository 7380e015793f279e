pub(crate) mod category_editor;
