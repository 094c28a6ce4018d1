use std::collections::HashMap;

use crate::models::OutlineElement;

/// 树中的节点，父节点为不持有所有权的下标
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineTreeNode {
    pub element: OutlineElement,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

/// 由扁平大纲构建的树视图
///
/// 所有节点由树持有，父子之间只通过下标相互引用
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutlineTree {
    nodes: Vec<OutlineTreeNode>,
    root: Option<usize>,
}

/// 树节点的只读句柄
#[derive(Debug, Clone, Copy)]
pub struct TreeNodeRef<'a> {
    tree: &'a OutlineTree,
    index: usize,
}

impl OutlineTree {
    /// 从大纲列表构建，父子 id 需已确定
    pub fn build(outline: &[OutlineElement]) -> OutlineTree {
        let positions: HashMap<&str, usize> = outline
            .iter()
            .enumerate()
            .map(|(index, element)| (element.id.as_str(), index))
            .collect();

        let mut nodes: Vec<OutlineTreeNode> = outline
            .iter()
            .map(|element| OutlineTreeNode {
                element: element.clone(),
                parent: None,
                children: Vec::new(),
            })
            .collect();

        for (index, element) in outline.iter().enumerate() {
            let parent = element
                .parent_id
                .as_deref()
                .and_then(|id| positions.get(id).copied());
            if let Some(parent) = parent {
                nodes[index].parent = Some(parent);
                nodes[parent].children.push(index);
            }
        }

        let root = outline.iter().position(|element| element.level == 1);
        OutlineTree { nodes, root }
    }

    pub fn root(&self) -> Option<TreeNodeRef<'_>> {
        self.root.map(|index| TreeNodeRef { tree: self, index })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, index: usize) -> Option<TreeNodeRef<'_>> {
        (index < self.nodes.len()).then(|| TreeNodeRef { tree: self, index })
    }

    /// 按大纲顺序的所有节点
    pub fn all_nodes(&self) -> Vec<TreeNodeRef<'_>> {
        (0..self.nodes.len())
            .map(|index| TreeNodeRef { tree: self, index })
            .collect()
    }

    /// 没有子节点的节点
    pub fn leaf_nodes(&self) -> Vec<TreeNodeRef<'_>> {
        self.all_nodes()
            .into_iter()
            .filter(|node| node.is_leaf())
            .collect()
    }
}

impl<'a> TreeNodeRef<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    fn raw(&self) -> &'a OutlineTreeNode {
        &self.tree.nodes[self.index]
    }

    pub fn element(&self) -> &'a OutlineElement {
        &self.raw().element
    }

    pub fn parent(&self) -> Option<TreeNodeRef<'a>> {
        self.raw().parent.map(|index| TreeNodeRef {
            tree: self.tree,
            index,
        })
    }

    pub fn children(&self) -> Vec<TreeNodeRef<'a>> {
        self.raw()
            .children
            .iter()
            .map(|&index| TreeNodeRef {
                tree: self.tree,
                index,
            })
            .collect()
    }

    pub fn is_leaf(&self) -> bool {
        self.raw().children.is_empty()
    }

    /// 到根的距离，沿父节点回溯计算
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.parent();
        while let Some(node) = current {
            depth += 1;
            current = node.parent();
        }
        depth
    }
}
