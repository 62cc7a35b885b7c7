use shared::{DescriptionEdit, ItemField};
use web_sys::HtmlTextAreaElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ItemDetailsProps {
    pub name: AttrValue,
    pub type_label: AttrValue,
    pub description: AttrValue,
    /// Already filtered down to fields with a value
    pub fields: Vec<ItemField>,
    /// Edit state for this item, if the user is editing its description
    #[prop_or_default]
    pub editing: Option<DescriptionEdit>,
    pub can_edit: bool,
    pub on_begin_edit: Callback<()>,
    pub on_edit_text: Callback<String>,
    pub on_save: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(ItemDetails)]
pub fn item_details(props: &ItemDetailsProps) -> Html {
    let description = match (&props.editing, props.can_edit) {
        (Some(edit), true) => {
            let oninput = {
                let on_edit_text = props.on_edit_text.clone();
                Callback::from(move |e: InputEvent| {
                    let textarea: HtmlTextAreaElement = e.target_unchecked_into();
                    on_edit_text.emit(textarea.value());
                })
            };
            let on_save = props.on_save.reform(|_: MouseEvent| ());
            let on_cancel = props.on_cancel.reform(|_: MouseEvent| ());

            html! {
                <div class="item-description editing">
                    <textarea value={edit.text.clone()} {oninput} rows="6" />
                    <div class="edit-actions">
                        <button class="btn btn-primary" onclick={on_save}>{"Save"}</button>
                        <button class="btn btn-secondary" onclick={on_cancel}>{"Cancel"}</button>
                    </div>
                </div>
            }
        }
        _ => {
            let on_edit = props.on_begin_edit.reform(|_: MouseEvent| ());
            html! {
                <div class="item-description">
                    <p>{&props.description}</p>
                    if props.can_edit {
                        <button class="btn btn-link" onclick={on_edit}>{"Edit description"}</button>
                    }
                </div>
            }
        }
    };

    html! {
        <article class="item-details">
            <header>
                <h3>{&props.name}</h3>
                <span class="item-type">{&props.type_label}</span>
            </header>

            if !props.fields.is_empty() {
                <dl class="item-fields">
                    {for props.fields.iter().map(|field| html! {
                        <>
                            <dt>{&field.label}</dt>
                            <dd>{field.value.clone().unwrap_or_default()}</dd>
                        </>
                    })}
                </dl>
            }

            {description}
        </article>
    }
}
