pub(crate) mod category_list;
