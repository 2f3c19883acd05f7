use super::host::{Bounds, FormSpec, HostUi, ItemKind, ItemSpec, StatusKind, UiError};
use crate::store::QueryResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryItem {
    pub spec: ItemSpec,
    pub text: String,
    pub checked: bool,
    pub grid: QueryResult,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryForm {
    pub spec: FormSpec,
    pub items: Vec<MemoryItem>,
}

impl MemoryForm {
    pub fn item(&self, item_id: &str) -> Option<&MemoryItem> {
        self.items
            .iter()
            .find(|item| item.spec.id.eq_ignore_ascii_case(item_id))
    }

    fn item_mut(&mut self, item_id: &str) -> Option<&mut MemoryItem> {
        self.items
            .iter_mut()
            .find(|item| item.spec.id.eq_ignore_ascii_case(item_id))
    }
}

#[derive(Debug, Default)]
pub struct MemoryHost {
    forms: Vec<MemoryForm>,
    focused: Option<String>,
    statuses: Vec<(String, StatusKind)>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self, form_id: &str) -> Option<&MemoryForm> {
        self.forms
            .iter()
            .find(|form| form.spec.id.eq_ignore_ascii_case(form_id))
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn statuses(&self) -> &[(String, StatusKind)] {
        &self.statuses
    }

    pub fn last_status(&self) -> Option<&(String, StatusKind)> {
        self.statuses.last()
    }

    fn form_mut(&mut self, form_id: &str) -> Result<&mut MemoryForm, UiError> {
        self.forms
            .iter_mut()
            .find(|form| form.spec.id.eq_ignore_ascii_case(form_id))
            .ok_or_else(|| UiError::MissingForm {
                form_id: form_id.to_string(),
            })
    }

    fn item_ref(&self, form_id: &str, item_id: &str) -> Result<&MemoryItem, UiError> {
        let form = self.form(form_id).ok_or_else(|| UiError::MissingForm {
            form_id: form_id.to_string(),
        })?;
        form.item(item_id).ok_or_else(|| UiError::MissingItem {
            form_id: form_id.to_string(),
            item_id: item_id.to_string(),
        })
    }

    fn item_mut(
        &mut self,
        form_id: &str,
        item_id: &str,
        expected: &[ItemKind],
    ) -> Result<&mut MemoryItem, UiError> {
        let form = self.form_mut(form_id)?;
        let item = form.item_mut(item_id).ok_or_else(|| UiError::MissingItem {
            form_id: form_id.to_string(),
            item_id: item_id.to_string(),
        })?;
        check_kind(form_id, item, expected)?;
        Ok(item)
    }
}

fn check_kind(form_id: &str, item: &MemoryItem, expected: &[ItemKind]) -> Result<(), UiError> {
    if expected.contains(&item.spec.kind) {
        return Ok(());
    }
    Err(UiError::WrongKind {
        form_id: form_id.to_string(),
        item_id: item.spec.id.clone(),
        expected: expected[0],
        actual: item.spec.kind,
    })
}

impl HostUi for MemoryHost {
    fn form_exists(&self, form_id: &str) -> bool {
        self.form(form_id).is_some()
    }

    fn open_forms(&self) -> Vec<String> {
        self.forms.iter().map(|form| form.spec.id.clone()).collect()
    }

    fn parent_of(&self, form_id: &str) -> Option<String> {
        self.form(form_id)?.spec.parent.clone()
    }

    fn create_form(&mut self, spec: FormSpec) -> Result<(), UiError> {
        if self.form_exists(&spec.id) {
            return Err(UiError::DuplicateForm { form_id: spec.id });
        }
        self.focused = Some(spec.id.clone());
        self.forms.push(MemoryForm {
            spec,
            items: Vec::new(),
        });
        Ok(())
    }

    fn close_form(&mut self, form_id: &str) -> Result<(), UiError> {
        let before = self.forms.len();
        self.forms
            .retain(|form| !form.spec.id.eq_ignore_ascii_case(form_id));
        if self.forms.len() == before {
            return Err(UiError::MissingForm {
                form_id: form_id.to_string(),
            });
        }
        if self
            .focused
            .as_deref()
            .is_some_and(|focused| focused.eq_ignore_ascii_case(form_id))
        {
            self.focused = self.forms.last().map(|form| form.spec.id.clone());
        }
        Ok(())
    }

    fn focus_form(&mut self, form_id: &str) -> Result<(), UiError> {
        let id = self.form_mut(form_id)?.spec.id.clone();
        self.focused = Some(id);
        Ok(())
    }

    fn resize_form(&mut self, form_id: &str, width: i32, height: i32) -> Result<(), UiError> {
        let form = self.form_mut(form_id)?;
        form.spec.bounds.width = width;
        form.spec.bounds.height = height;
        Ok(())
    }

    fn add_item(&mut self, form_id: &str, spec: ItemSpec) -> Result<(), UiError> {
        let form = self.form_mut(form_id)?;
        if form.item(&spec.id).is_some() {
            return Err(UiError::DuplicateItem {
                form_id: form_id.to_string(),
                item_id: spec.id,
            });
        }
        form.items.push(MemoryItem {
            spec,
            text: String::new(),
            checked: false,
            grid: QueryResult::default(),
        });
        Ok(())
    }

    fn item_kind(&self, form_id: &str, item_id: &str) -> Option<ItemKind> {
        self.item_ref(form_id, item_id).ok().map(|item| item.spec.kind)
    }

    fn item_bounds(&self, form_id: &str, item_id: &str) -> Result<Bounds, UiError> {
        Ok(self.item_ref(form_id, item_id)?.spec.bounds)
    }

    fn text(&self, form_id: &str, item_id: &str) -> Result<String, UiError> {
        let item = self.item_ref(form_id, item_id)?;
        match item.spec.kind {
            ItemKind::Edit | ItemKind::ComboBox => Ok(item.text.clone()),
            ItemKind::CheckBox => Ok(if item.checked { "Y" } else { "N" }.to_string()),
            ItemKind::Label | ItemKind::Button => Ok(item.spec.caption.clone()),
            ItemKind::Grid => Err(UiError::WrongKind {
                form_id: form_id.to_string(),
                item_id: item_id.to_string(),
                expected: ItemKind::Edit,
                actual: ItemKind::Grid,
            }),
        }
    }

    fn set_text(&mut self, form_id: &str, item_id: &str, value: &str) -> Result<(), UiError> {
        let item = self.item_mut(form_id, item_id, &[ItemKind::Edit, ItemKind::ComboBox])?;
        item.text = value.to_string();
        Ok(())
    }

    fn is_checked(&self, form_id: &str, item_id: &str) -> Result<bool, UiError> {
        let item = self.item_ref(form_id, item_id)?;
        check_kind(form_id, item, &[ItemKind::CheckBox])?;
        Ok(item.checked)
    }

    fn set_checked(
        &mut self,
        form_id: &str,
        item_id: &str,
        checked: bool,
    ) -> Result<(), UiError> {
        let item = self.item_mut(form_id, item_id, &[ItemKind::CheckBox])?;
        item.checked = checked;
        Ok(())
    }

    fn set_caption(
        &mut self,
        form_id: &str,
        item_id: &str,
        caption: &str,
    ) -> Result<(), UiError> {
        let item = self.item_mut(
            form_id,
            item_id,
            &[ItemKind::Label, ItemKind::Button, ItemKind::CheckBox],
        )?;
        item.spec.caption = caption.to_string();
        Ok(())
    }

    fn bind_grid(
        &mut self,
        form_id: &str,
        item_id: &str,
        result: QueryResult,
    ) -> Result<(), UiError> {
        let item = self.item_mut(form_id, item_id, &[ItemKind::Grid])?;
        item.grid = result;
        Ok(())
    }

    fn grid(&self, form_id: &str, item_id: &str) -> Result<QueryResult, UiError> {
        let item = self.item_ref(form_id, item_id)?;
        check_kind(form_id, item, &[ItemKind::Grid])?;
        Ok(item.grid.clone())
    }

    fn set_status(&mut self, message: &str, kind: StatusKind) {
        self.statuses.push((message.to_string(), kind));
    }
}
